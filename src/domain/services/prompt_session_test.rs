use std::sync::Arc;
use std::sync::Mutex;

use anyhow::bail;
use anyhow::Result;
use tokio::sync::mpsc;
use tui_textarea::Input;
use tui_textarea::Key;

use super::PromptSession;
use super::SubmitOutcome;
use crate::domain::models::Action;
use crate::domain::models::ClipboardWriter;
use crate::domain::models::GenerationError;
use crate::domain::models::GenerationRequest;
use crate::domain::models::GenerationResult;
use crate::domain::models::NoticeType;
use crate::domain::models::PromptTab;
use crate::domain::models::SessionState;

#[derive(Default, Clone)]
struct RecordingClipboard {
    writes: Arc<Mutex<Vec<String>>>,
    deny: bool,
}

impl ClipboardWriter for RecordingClipboard {
    fn write_text(&self, text: &str) -> Result<()> {
        if self.deny {
            bail!("clipboard access denied");
        }

        self.writes.lock().unwrap().push(text.to_string());
        return Ok(());
    }
}

fn session() -> (PromptSession, RecordingClipboard) {
    let clipboard = RecordingClipboard::default();
    return (PromptSession::new(Box::new(clipboard.clone())), clipboard);
}

fn enter() -> Input {
    return Input {
        key: Key::Enter,
        ctrl: false,
        alt: false,
    };
}

fn expected_result() -> GenerationResult {
    return GenerationResult {
        id: None,
        command: "X".to_string(),
        structured_prompt: "S".to_string(),
        system_prompt: "P".to_string(),
        created_at: "2025-01-01T00:00:00Z".to_string(),
    };
}

fn to_request(action: Option<Action>) -> Result<GenerationRequest> {
    let req = match action {
        Some(Action::GenerationRequest(req)) => req,
        _ => bail!("Wrong type from recv"),
    };

    return Ok(req);
}

fn last_notice(session: &PromptSession) -> (NoticeType, String) {
    let notice = session.notices().last().unwrap();
    return (notice.notice_type(), notice.text.to_string());
}

mod submit {
    use super::*;

    #[test]
    fn it_dispatches_the_trimmed_command() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let (mut session, _) = session();

        let outcome = session.submit("   Write a blog post about AI  \n", &tx)?;

        assert_eq!(outcome, SubmitOutcome::Dispatched);
        assert_eq!(session.state(), &SessionState::Loading);

        let req = to_request(rx.try_recv().ok())?;
        assert_eq!(req.command.as_str(), "Write a blog post about AI");
        assert!(rx.try_recv().is_err());

        return Ok(());
    }

    #[test]
    fn it_rejects_empty_commands() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let (mut session, _) = session();

        for text in ["", "   ", "\t\n"] {
            let outcome = session.submit(text, &tx)?;
            assert_eq!(outcome, SubmitOutcome::Rejected);
        }

        assert_eq!(session.state(), &SessionState::Idle);
        assert!(rx.try_recv().is_err());
        assert_eq!(
            last_notice(&session),
            (NoticeType::Error, "Please enter a command".to_string())
        );

        return Ok(());
    }

    #[test]
    fn it_keeps_the_previous_result_on_empty_commands() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let (mut session, _) = session();

        session.submit("X", &tx)?;
        let req = to_request(rx.try_recv().ok())?;
        session.handle_generation_response(req.id, Ok(expected_result()));

        let outcome = session.submit(" ", &tx)?;

        assert_eq!(outcome, SubmitOutcome::Rejected);
        assert_eq!(session.state(), &SessionState::Success(expected_result()));
        assert!(rx.try_recv().is_err());

        return Ok(());
    }

    #[test]
    fn it_ignores_submits_while_loading() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let (mut session, _) = session();

        session.submit("first", &tx)?;
        let outcome = session.submit("second", &tx)?;

        assert_eq!(outcome, SubmitOutcome::Ignored);
        assert!(session.is_loading());

        let req = to_request(rx.try_recv().ok())?;
        assert_eq!(req.command.as_str(), "first");
        assert!(rx.try_recv().is_err());

        return Ok(());
    }

    #[test]
    fn it_allows_resubmitting_after_a_failure() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let (mut session, _) = session();

        session.submit("X", &tx)?;
        let first = to_request(rx.try_recv().ok())?;
        session.handle_generation_response(
            first.id,
            Err(GenerationError::Service("boom".to_string())),
        );

        let outcome = session.submit("X", &tx)?;
        let second = to_request(rx.try_recv().ok())?;

        assert_eq!(outcome, SubmitOutcome::Dispatched);
        assert!(second.id > first.id);
        assert!(session.is_loading());

        return Ok(());
    }

    #[test]
    fn it_errors_when_the_actions_service_is_gone() {
        let (tx, rx) = mpsc::unbounded_channel::<Action>();
        drop(rx);
        let (mut session, _) = session();

        assert!(session.submit("X", &tx).is_err());
        assert_eq!(session.state(), &SessionState::Idle);
    }
}

mod submit_on_enter_key {
    use super::*;

    #[test]
    fn it_submits_on_enter() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let (mut session, _) = session();

        let outcome = session.submit_on_enter_key(&enter(), "Create a meeting agenda", &tx)?;

        assert_eq!(outcome, SubmitOutcome::Dispatched);
        let req = to_request(rx.try_recv().ok())?;
        assert_eq!(req.command.as_str(), "Create a meeting agenda");
        assert!(rx.try_recv().is_err());

        return Ok(());
    }

    #[test]
    fn it_ignores_other_keys() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let (mut session, _) = session();

        let input = Input {
            key: Key::Char('a'),
            ctrl: false,
            alt: false,
        };
        let outcome = session.submit_on_enter_key(&input, "Create a meeting agenda", &tx)?;

        assert_eq!(outcome, SubmitOutcome::Ignored);
        assert_eq!(session.state(), &SessionState::Idle);
        assert!(rx.try_recv().is_err());

        return Ok(());
    }

    #[test]
    fn it_ignores_enter_while_loading() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let (mut session, _) = session();

        session.submit_on_enter_key(&enter(), "first", &tx)?;
        let outcome = session.submit_on_enter_key(&enter(), "first", &tx)?;

        assert_eq!(outcome, SubmitOutcome::Ignored);
        to_request(rx.try_recv().ok())?;
        assert!(rx.try_recv().is_err());

        return Ok(());
    }

    #[test]
    fn it_submits_on_enter_after_success_and_failure() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let (mut session, _) = session();

        session.submit_on_enter_key(&enter(), "X", &tx)?;
        let req = to_request(rx.try_recv().ok())?;
        session.handle_generation_response(req.id, Ok(expected_result()));

        assert_eq!(
            session.submit_on_enter_key(&enter(), "X", &tx)?,
            SubmitOutcome::Dispatched
        );
        let req = to_request(rx.try_recv().ok())?;
        session.handle_generation_response(
            req.id,
            Err(GenerationError::Transport("connection refused".to_string())),
        );

        assert_eq!(
            session.submit_on_enter_key(&enter(), "X", &tx)?,
            SubmitOutcome::Dispatched
        );
        to_request(rx.try_recv().ok())?;
        assert!(rx.try_recv().is_err());

        return Ok(());
    }
}

mod handle_generation_response {
    use super::*;

    #[test]
    fn it_moves_to_success() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let (mut session, _) = session();

        session.submit("X", &tx)?;
        let req = to_request(rx.try_recv().ok())?;
        session.handle_generation_response(req.id, Ok(expected_result()));

        assert_eq!(session.result(), Some(&expected_result()));
        assert!(!session.is_loading());
        assert_eq!(
            last_notice(&session),
            (
                NoticeType::Success,
                "Prompt generated successfully!".to_string()
            )
        );

        return Ok(());
    }

    #[test]
    fn it_moves_to_failed_with_the_service_detail() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let (mut session, _) = session();

        session.submit("X", &tx)?;
        let req = to_request(rx.try_recv().ok())?;
        session.handle_generation_response(
            req.id,
            Err(GenerationError::Service("boom".to_string())),
        );

        assert_eq!(session.state(), &SessionState::Failed("boom".to_string()));
        assert_eq!(last_notice(&session), (NoticeType::Error, "boom".to_string()));

        return Ok(());
    }

    #[test]
    fn it_replaces_the_previous_result() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let (mut session, _) = session();

        session.submit("X", &tx)?;
        let req = to_request(rx.try_recv().ok())?;
        session.handle_generation_response(req.id, Ok(expected_result()));

        session.submit("Y", &tx)?;
        let req = to_request(rx.try_recv().ok())?;
        let mut next = expected_result();
        next.command = "Y".to_string();
        next.structured_prompt = "S2".to_string();
        session.handle_generation_response(req.id, Ok(next.clone()));

        assert_eq!(session.result(), Some(&next));

        return Ok(());
    }

    #[test]
    fn it_drops_responses_for_stale_requests() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let (mut session, _) = session();

        session.submit("X", &tx)?;
        let req = to_request(rx.try_recv().ok())?;
        session.handle_generation_response(req.id + 1, Ok(expected_result()));

        assert!(session.is_loading());
        assert!(session.notices().is_empty());

        session.handle_generation_response(req.id, Ok(expected_result()));
        session.handle_generation_response(
            req.id,
            Err(GenerationError::Service("late".to_string())),
        );

        assert_eq!(session.result(), Some(&expected_result()));

        return Ok(());
    }

    #[test]
    fn it_ignores_responses_when_idle() {
        let (mut session, _) = session();
        session.handle_generation_response(1, Ok(expected_result()));

        assert_eq!(session.state(), &SessionState::Idle);
    }
}

mod copy_to_clipboard {
    use super::*;

    #[test]
    fn it_writes_text_and_names_the_label() {
        let (mut session, clipboard) = session();
        let before = session.state().clone();

        session.copy_to_clipboard("hello", "Structured prompt");

        assert_eq!(*clipboard.writes.lock().unwrap(), vec!["hello".to_string()]);
        assert_eq!(session.state(), &before);

        let (ntype, text) = last_notice(&session);
        assert_eq!(ntype, NoticeType::Success);
        assert!(text.contains("Structured prompt"));
    }

    #[test]
    fn it_surfaces_denied_access_as_a_notice() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let clipboard = RecordingClipboard {
            deny: true,
            ..Default::default()
        };
        let mut session = PromptSession::new(Box::new(clipboard.clone()));
        session.submit("X", &tx)?;
        let req = to_request(rx.try_recv().ok())?;
        session.handle_generation_response(req.id, Ok(expected_result()));

        session.copy_to_clipboard("hello", "System prompt");

        assert!(clipboard.writes.lock().unwrap().is_empty());
        assert_eq!(session.state(), &SessionState::Success(expected_result()));
        let (ntype, text) = last_notice(&session);
        assert_eq!(ntype, NoticeType::Error);
        assert!(text.contains("System prompt"));
        assert!(text.contains("clipboard access denied"));

        return Ok(());
    }

    #[test]
    fn it_copies_the_active_prompt() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let (mut session, clipboard) = session();
        session.submit("X", &tx)?;
        let req = to_request(rx.try_recv().ok())?;
        session.handle_generation_response(req.id, Ok(expected_result()));

        session.copy_active_prompt(PromptTab::System);
        assert_eq!(last_notice(&session).1, "System prompt copied to clipboard!");

        session.copy_active_prompt(PromptTab::Structured);
        assert_eq!(
            last_notice(&session).1,
            "Structured prompt copied to clipboard!"
        );

        assert_eq!(
            *clipboard.writes.lock().unwrap(),
            vec!["P".to_string(), "S".to_string()]
        );

        return Ok(());
    }

    #[test]
    fn it_skips_copying_without_a_result() {
        let (mut session, clipboard) = session();
        session.copy_active_prompt(PromptTab::Structured);

        assert!(clipboard.writes.lock().unwrap().is_empty());
        assert_eq!(last_notice(&session).0, NoticeType::Info);
    }
}

mod notices {
    use super::*;

    #[test]
    fn it_shows_the_newest_notice() {
        let (mut session, _) = session();
        assert!(session.active_notice().is_none());

        session.copy_to_clipboard("a", "First");
        session.copy_to_clipboard("b", "Second");
        session.prune_notices();

        assert_eq!(session.notices().len(), 2);
        assert_eq!(
            session.active_notice().unwrap().text,
            "Second copied to clipboard!"
        );
    }
}
