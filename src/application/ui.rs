#[cfg(test)]
#[path = "ui_test.rs"]
mod tests;

use std::io;

use anyhow::Result;
use crossterm::cursor;
use crossterm::event::DisableBracketedPaste;
use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableBracketedPaste;
use crossterm::event::EnableMouseCapture;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use ratatui::backend::CrosstermBackend;
use ratatui::prelude::*;
use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Padding;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Scrollbar;
use ratatui::widgets::ScrollbarOrientation;
use ratatui::Terminal;
use tokio::sync::mpsc;
use tui_textarea::Key;

use crate::domain::models::Action;
use crate::domain::models::Event;
use crate::domain::models::Loading;
use crate::domain::models::NoticeType;
use crate::domain::models::PromptTab;
use crate::domain::models::TextArea;
use crate::domain::models::EXAMPLE_COMMANDS;
use crate::domain::services::events::EventsService;
use crate::domain::services::scroll::Scroll;
use crate::domain::services::PromptSession;
use crate::domain::services::ResultView;
use crate::infrastructure::clipboard::SystemClipboard;

const KEY_HELP: &str =
    "Enter generate | Tab switch prompt | Ctrl+Y copy | Ctrl+E example | Ctrl+C quit";

/// Everything on screen that isn't owned by the session.
#[derive(Default)]
struct View {
    tab: PromptTab,
    scroll: Scroll,
    next_example: usize,
    loading: Loading,
}

fn render<B: Backend>(
    frame: &mut Frame<B>,
    session: &PromptSession,
    textarea: &tui_textarea::TextArea,
    view: &mut View,
) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(frame.size());

    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("promptsmith", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" - Transform simple commands into powerful AI prompts"),
        ])),
        layout[0],
    );

    if session.is_loading() {
        view.loading.render(frame, layout[1]);
    } else {
        frame.render_widget(textarea.widget(), layout[1]);
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(ResultView::title(session.state(), view.tab))
        .padding(Padding::new(1, 1, 0, 0));
    let inner = block.inner(layout[2]);

    let lines = ResultView::wrapped_lines(session.state(), view.tab, inner.width as usize)
        .into_iter()
        .map(Line::from)
        .collect::<Vec<Line>>();
    view.scroll.set_state(lines.len(), inner.height);

    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .scroll((view.scroll.position, 0)),
        layout[2],
    );
    frame.render_stateful_widget(
        Scrollbar::new(ScrollbarOrientation::VerticalRight),
        layout[2].inner(&Margin {
            vertical: 1,
            horizontal: 0,
        }),
        &mut view.scroll.scrollbar_state(),
    );

    if let Some(notice) = session.active_notice() {
        let color = match notice.notice_type() {
            NoticeType::Info => Color::Cyan,
            NoticeType::Success => Color::Green,
            NoticeType::Error => Color::Red,
        };
        frame.render_widget(
            Paragraph::new(notice.text.as_str()).style(Style::default().fg(color)),
            layout[3],
        );
    }

    frame.render_widget(
        Paragraph::new(KEY_HELP).style(Style::default().add_modifier(Modifier::DIM)),
        layout[4],
    );
}

async fn start_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    session: &mut PromptSession,
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    let mut events = EventsService::new(rx);
    let mut textarea = TextArea::default();
    let mut view = View::default();

    #[cfg(feature = "dev")]
    {
        textarea = TextArea::with_text(EXAMPLE_COMMANDS[0]);
    }

    tx.send(Action::HealthCheck())?;

    loop {
        terminal.draw(|frame| {
            render(frame, session, &textarea, &mut view);
        })?;

        match events.next().await? {
            Event::BackendNotice(notice) => {
                session.notify(notice);
            }
            Event::GenerationResponse(request_id, res) => {
                session.handle_generation_response(request_id, res);
                view.scroll.reset();
            }
            Event::KeyboardCharInput(input) => {
                if matches!(input.key, Key::Enter) {
                    let text = textarea.lines().join(" ");
                    session.submit_on_enter_key(&input, &text, &tx)?;
                } else if !session.is_loading() {
                    textarea.input(input);
                }
            }
            Event::KeyboardCTRLC() => {
                break;
            }
            Event::KeyboardCTRLE() => {
                if !session.is_loading() {
                    let example = EXAMPLE_COMMANDS[view.next_example % EXAMPLE_COMMANDS.len()];
                    textarea = TextArea::with_text(example);
                    view.next_example += 1;
                }
            }
            Event::KeyboardCTRLY() => {
                session.copy_active_prompt(view.tab);
            }
            Event::KeyboardPaste(text) => {
                if !session.is_loading() {
                    textarea.insert_str(text.replace(['\r', '\n'], " "));
                }
            }
            Event::KeyboardTab() => {
                view.tab = view.tab.toggle();
                view.scroll.reset();
            }
            Event::UIScrollDown() => {
                view.scroll.down();
            }
            Event::UIScrollUp() => {
                view.scroll.up();
            }
            Event::UIScrollPageDown() => {
                view.scroll.down_page();
            }
            Event::UIScrollPageUp() => {
                view.scroll.up_page();
            }
            Event::UITick() => {
                session.prune_notices();
                if session.is_loading() {
                    view.loading.tick();
                }
            }
        }
    }

    return Ok(());
}

pub fn destruct_terminal_for_panic() {
    let _ = disable_raw_mode();
    let _ = crossterm::execute!(
        io::stdout(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    );
    let _ = crossterm::execute!(io::stdout(), cursor::Show);
}

pub async fn start(
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    let mut stdout = io::stdout();

    enable_raw_mode()?;
    crossterm::execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;
    let term_backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(term_backend)?;
    let mut session = PromptSession::new(Box::<SystemClipboard>::default());

    let res = start_loop(&mut terminal, &mut session, tx, rx).await;

    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    return res;
}
