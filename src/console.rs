//! Interactive review console: the admin lesson-approval page in a terminal.

use std::str::FromStr;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWriteExt};

use crate::api::LessonDraftApi;
use crate::model::entity::{DraftStatus, LessonType};
use crate::model::{DraftFilter, DraftStore, Filter};
use crate::notify::Notifier;
use crate::render;
use crate::review::{ApprovalCoordinator, QuickView, ReviewError, ReviewOutcome};
use crate::utils::signal::shutdown_signal;

pub const HELP: &str = "\
commands:
  list                         show drafts matching the current filter
  search <text>                filter by title or instructor (empty clears)
  status <all|new|approved|rejected>
  type <all|video|code|quiz>
  clear                        drop every filter
  open <id>                    open the quick view of a draft
  approve                      approve the open draft
  reject [reason]              open the reject form, or reject right away
  reason <text>                type the rejection reason
  submit                       send the typed rejection
  cancel                       close the reject form
  close                        close the quick view
  reload                       fetch the draft list again
  help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Search(String),
    Status(Filter<DraftStatus>),
    Type(Filter<LessonType>),
    ClearFilter,
    Open(i64),
    Approve,
    Reject(Option<String>),
    Reason(String),
    Submit,
    Cancel,
    Close,
    Reload,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_ascii_lowercase().as_str() {
            "list" | "ls" => Self::List,
            "search" => Self::Search(rest.to_string()),
            "status" => Self::Status(rest.parse()?),
            "type" => Self::Type(rest.parse()?),
            "clear" => Self::ClearFilter,
            "open" => Self::Open(
                rest.parse()
                    .map_err(|_| format!("`{rest}` is not a draft id"))?,
            ),
            "approve" => Self::Approve,
            "reject" if rest.is_empty() => Self::Reject(None),
            "reject" => Self::Reject(Some(rest.to_string())),
            "reason" => Self::Reason(rest.to_string()),
            "submit" => Self::Submit,
            "cancel" => Self::Cancel,
            "close" => Self::Close,
            "reload" => Self::Reload,
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            "" => return Err(String::from("empty command")),
            other => return Err(format!("unknown command `{other}`, try `help`")),
        };
        Ok(command)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Render(String),
    Quit,
}

/// Owns the page state: one draft store, the filter, and at most one open quick view.
pub struct Console<'a, A: ?Sized, N: ?Sized> {
    api: &'a A,
    notifier: &'a N,
    store: DraftStore,
    filter: DraftFilter,
    view: Option<QuickView>,
}

impl<'a, A, N> Console<'a, A, N>
where
    A: LessonDraftApi + ?Sized,
    N: Notifier + ?Sized,
{
    pub fn new(api: &'a A, notifier: &'a N) -> Self {
        Self {
            api,
            notifier,
            store: DraftStore::new(),
            filter: DraftFilter::default(),
            view: None,
        }
    }

    pub fn store(&self) -> &DraftStore {
        &self.store
    }

    pub fn view(&self) -> Option<&QuickView> {
        self.view.as_ref()
    }

    pub fn filter(&self) -> &DraftFilter {
        &self.filter
    }

    fn coordinator(&mut self) -> ApprovalCoordinator<'_, A, N> {
        ApprovalCoordinator::new(self.api, &mut self.store, self.notifier)
    }

    fn render_list(&self) -> String {
        let visible = self.store.visible(&self.filter);
        format!(
            "{}\n{}",
            render::list_header(self.store.counts(), visible.len(), &self.filter),
            render::draft_table(&visible)
        )
    }

    fn render_view(&self) -> Reply {
        match &self.view {
            Some(view) => Reply::Render(render::quick_view(view)),
            None => Self::no_view(),
        }
    }

    fn no_view() -> Reply {
        Reply::Render(String::from("no quick view is open, use `open <id>`"))
    }

    #[tracing::instrument(skip(self))]
    pub async fn execute(&mut self, command: Command) -> Reply {
        match command {
            Command::List => Reply::Render(self.render_list()),
            Command::Search(text) => {
                self.filter.search = text;
                Reply::Render(self.render_list())
            }
            Command::Status(status) => {
                self.filter.status = status;
                Reply::Render(self.render_list())
            }
            Command::Type(lesson_type) => {
                self.filter.lesson_type = lesson_type;
                Reply::Render(self.render_list())
            }
            Command::ClearFilter => {
                self.filter = DraftFilter::default();
                Reply::Render(self.render_list())
            }
            Command::Reload => {
                self.coordinator().reload().await;
                Reply::Render(self.render_list())
            }
            Command::Open(id) => self.open(id).await,
            Command::Approve => {
                let Some(mut view) = self.view.take() else {
                    return Self::no_view();
                };
                let outcome = self.coordinator().approve(&mut view).await;
                self.after_submit(view, outcome)
            }
            Command::Reject(None) => {
                let Some(view) = self.view.as_mut() else {
                    return Self::no_view();
                };
                if let Err(e) = view.start_reject() {
                    return Reply::Render(describe(&e));
                }
                self.render_view()
            }
            Command::Reject(Some(reason)) => {
                let Some(mut view) = self.view.take() else {
                    return Self::no_view();
                };
                let outcome = self.coordinator().reject(&mut view, &reason).await;
                self.after_submit(view, outcome)
            }
            Command::Reason(text) => {
                let Some(view) = self.view.as_mut() else {
                    return Self::no_view();
                };
                if let Err(e) = view.set_reason(text) {
                    return Reply::Render(describe(&e));
                }
                self.render_view()
            }
            Command::Submit => {
                let Some(mut view) = self.view.take() else {
                    return Self::no_view();
                };
                let outcome = self.coordinator().confirm_reject(&mut view).await;
                self.after_submit(view, outcome)
            }
            Command::Cancel => {
                let Some(view) = self.view.as_mut() else {
                    return Self::no_view();
                };
                view.cancel_reject();
                self.render_view()
            }
            Command::Close => {
                if let Some(mut view) = self.view.take() {
                    view.close();
                }
                Reply::Render(self.render_list())
            }
            Command::Help => Reply::Render(HELP.to_string()),
            Command::Quit => Reply::Quit,
        }
    }

    async fn open(&mut self, id: i64) -> Reply {
        if let Some(mut previous) = self.view.take() {
            previous.close();
        }

        let Some(draft) = self.store.get(id).cloned() else {
            return Reply::Render(describe(&ReviewError::DraftNotFound { draft_id: id }));
        };

        let view = QuickView::open(self.api, draft, self.notifier).await;
        self.view = Some(view);
        self.render_view()
    }

    fn after_submit(&mut self, view: QuickView, outcome: ReviewOutcome) -> Reply {
        match outcome {
            ReviewOutcome::Applied(_) => Reply::Render(self.render_list()),
            ReviewOutcome::Failed(e) => {
                self.view = Some(view);
                match e.redirect() {
                    Some(redirect) => Reply::Render(format!(
                        "session refused, continue at {}",
                        redirect.route()
                    )),
                    None => self.render_view(),
                }
            }
            ReviewOutcome::Invalid(_) => {
                self.view = Some(view);
                self.render_view()
            }
            ReviewOutcome::Ignored(e) => {
                self.view = Some(view);
                Reply::Render(describe(&e))
            }
        }
    }

    /// Reads commands line by line until `quit`, end of input or Ctrl+C.
    pub async fn run<R>(&mut self, input: R) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = input.lines();
        let mut stdout = tokio::io::stdout();

        let shutdown = shutdown_signal();
        tokio::pin!(shutdown);

        if !self.coordinator().reload().await {
            tracing::warn!("starting with an empty draft list");
        }
        stdout
            .write_all(format!("{}\n{}\n", self.render_list(), "type `help` for commands").as_bytes())
            .await?;

        loop {
            stdout.write_all(b"> ").await?;
            stdout.flush().await?;

            let line = tokio::select! {
                _ = &mut shutdown => break,
                line = lines.next_line() => line?,
            };
            let Some(line) = line else { break };
            if line.trim().is_empty() {
                continue;
            }

            let command = match line.parse::<Command>() {
                Ok(command) => command,
                Err(message) => {
                    stdout.write_all(format!("{message}\n").as_bytes()).await?;
                    continue;
                }
            };

            let reply = tokio::select! {
                _ = &mut shutdown => break,
                reply = self.execute(command) => reply,
            };

            match reply {
                Reply::Render(text) => stdout.write_all(format!("{text}\n").as_bytes()).await?,
                Reply::Quit => break,
            }
        }

        if let Some(mut view) = self.view.take() {
            view.close();
        }
        stdout.flush().await?;
        Ok(())
    }
}

fn describe(error: &ReviewError) -> String {
    match error {
        ReviewError::DraftNotFound { draft_id } => format!("draft {draft_id} is not in the list"),
        ReviewError::SubmissionInFlight { .. } => {
            crate::notify::messages::SUBMISSION_IN_FLIGHT.to_string()
        }
        ReviewError::NotReviewable { status, .. } => {
            format!("this draft is already {status}, nothing to review")
        }
        ReviewError::DetailsNotLoaded { .. } => {
            String::from("lesson details are not loaded, close and reopen the quick view")
        }
        ReviewError::QuizReviewUnsupported { .. } => {
            crate::notify::messages::QUIZ_NOT_IMPLEMENTED.to_string()
        }
        ReviewError::RejectFormClosed { .. } => String::from("open the reject form with `reject`"),
        ReviewError::ViewClosed { .. } => String::from("the quick view is closed"),
        ReviewError::EmptyReason => crate::notify::messages::EMPTY_REASON.to_string(),
    }
}
