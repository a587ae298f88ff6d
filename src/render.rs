//! Plain-text rendering of the draft list and the quick view.

use std::fmt::Write;

use crate::model::entity::{
    CodeLessonDetails, DraftStatus, LessonDetails, LessonDraft, VideoLessonDetails,
};
use crate::model::{DraftFilter, Filter, StatusCounts};
use crate::notify::messages;
use crate::review::{LoadState, QuickView, ReviewPhase};

const TITLE_WIDTH: usize = 36;
const NAME_WIDTH: usize = 20;

/// `125` renders as `2:05`, `3723` as `1:02:03`.
pub fn format_duration(secs: u64) -> String {
    let (h, m, s) = (secs / 3600, (secs % 3600) / 60, secs % 60);
    if h > 0 {
        format!("{h}:{m:02}:{s:02}")
    } else {
        format!("{m}:{s:02}")
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut out: String = text.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}

fn pad(text: &str, width: usize) -> String {
    let text = truncate(text, width);
    let fill = width.saturating_sub(text.chars().count());
    format!("{text}{}", " ".repeat(fill))
}

pub fn list_header(counts: StatusCounts, shown: usize, filter: &DraftFilter) -> String {
    let mut out = format!(
        "Lesson drafts: {shown} shown of {} (new {}, approved {}, rejected {})",
        counts.total(),
        counts.new,
        counts.approved,
        counts.rejected
    );

    if !filter.is_empty() {
        let status = match filter.status {
            Filter::All => "all".to_string(),
            Filter::Only(s) => s.to_string(),
        };
        let lesson_type = match filter.lesson_type {
            Filter::All => "all".to_string(),
            Filter::Only(t) => t.to_string(),
        };
        let _ = write!(
            out,
            "\nfilter: search=\"{}\" status={status} type={lesson_type}",
            filter.search
        );
    }
    out
}

pub fn draft_table(drafts: &[&LessonDraft]) -> String {
    if drafts.is_empty() {
        return String::from("(no lesson drafts)");
    }

    let mut out = format!(
        "{:>6}  {}  {:<5}  {:<8}  {}  {}\n",
        "ID",
        pad("TITLE", TITLE_WIDTH),
        "TYPE",
        "STATUS",
        pad("INSTRUCTOR", NAME_WIDTH),
        "UPDATED"
    );

    for draft in drafts {
        let _ = writeln!(
            out,
            "{:>6}  {}  {:<5}  {:<8}  {}  {}",
            draft.id(),
            pad(draft.title(), TITLE_WIDTH),
            draft.lesson_type().as_str(),
            draft.status().as_str(),
            pad(&draft.instructor().name, NAME_WIDTH),
            draft.updated_at().format("%Y-%m-%d %H:%M"),
        );
    }
    out.truncate(out.trim_end().len());
    out
}

fn video_section(out: &mut String, video: &VideoLessonDetails) {
    let _ = writeln!(out, "Video:     {}", video.video_url);
    let _ = writeln!(out, "Duration:  {}", format_duration(video.duration));
    let _ = writeln!(
        out,
        "Content:   {}",
        video.content().unwrap_or("(pending AI processing)")
    );
    let _ = writeln!(
        out,
        "AI notes:  {}",
        video.response_from_ai().unwrap_or("(pending AI processing)")
    );
}

fn block(out: &mut String, label: &str, body: &str) {
    let _ = writeln!(out, "{label}:");
    if body.trim().is_empty() {
        let _ = writeln!(out, "    (empty)");
        return;
    }
    for line in body.lines() {
        let _ = writeln!(out, "    {line}");
    }
}

fn code_section(out: &mut String, code: &CodeLessonDetails) {
    let _ = writeln!(
        out,
        "Language:  {}    Difficulty: {}",
        code.language, code.difficulty_level
    );
    block(out, "Problem", &code.content);
    block(out, "Initial code", &code.initial_code);
    block(out, "Solution", &code.solution_code);
    block(out, "Expected output", &code.expected_output);
    block(out, "Hints", &code.hints);
    let _ = writeln!(out, "Test case: {}", code.test_case_description);
    block(out, "  input", &code.test_case_input);
    block(out, "  output", &code.test_case_output);
}

pub fn quick_view(view: &QuickView) -> String {
    let draft = view.draft();
    let mut out = String::new();

    let _ = writeln!(
        out,
        "#{} {} [{}] status: {}",
        draft.id(),
        draft.title(),
        draft.lesson_type(),
        draft.status()
    );
    let _ = writeln!(
        out,
        "Instructor: {} <{}>  chapter {}  order {}  published: {}",
        draft.instructor().name,
        draft.instructor().email,
        draft.chapter_id(),
        draft.order_index(),
        if draft.is_publish() { "yes" } else { "no" }
    );
    out.push_str("----\n");

    match view.load_state() {
        LoadState::Loading => out.push_str("Loading lesson details...\n"),
        LoadState::LoadFailed(_) => {
            let _ = writeln!(out, "{}.", messages::LOAD_DETAILS_FAILED);
            out.push_str("Close and reopen the quick view to try again.\n");
            // no action panel without details
            return out.trim_end().to_string();
        }
        LoadState::Loaded(LessonDetails::Video(video)) => video_section(&mut out, video),
        LoadState::Loaded(LessonDetails::Code(code)) => code_section(&mut out, code),
        LoadState::Loaded(LessonDetails::Quiz) => {
            let _ = writeln!(out, "{}.", messages::QUIZ_NOT_IMPLEMENTED);
        }
    }
    out.push_str("----\n");

    match draft.status() {
        DraftStatus::Rejected => {
            let _ = writeln!(
                out,
                "Rejected: {}",
                view.rejection_reason().unwrap_or_default()
            );
        }
        DraftStatus::Approved => out.push_str("Approved.\n"),
        DraftStatus::New => match view.phase() {
            ReviewPhase::Submitting(_) => out.push_str("Submitting... (actions disabled)\n"),
            ReviewPhase::Rejecting { reason } => {
                let _ = writeln!(out, "Reject reason: {reason}");
                out.push_str("[submit] send rejection   [cancel] back\n");
            }
            ReviewPhase::Idle if view.actions_available() => {
                out.push_str("[approve]   [reject]\n");
            }
            ReviewPhase::Idle => {}
        },
    }

    out.trim_end().to_string()
}
