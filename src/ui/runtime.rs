use crate::client::{StatusSource, Submitter};
use crate::config::RequestDefaults;
use crate::session::GenerationSession;
use crate::ui::app::App;
use crate::ui::events::{AppEvent, EventHandler};
use crate::ui::input::{handle_key, InputAction};
use crate::ui::render::draw;
use crate::ui::terminal_guard::setup_terminal;
use std::io;
use std::time::Duration;

/// Spinner and redraw cadence.
const TICK_RATE: Duration = Duration::from_millis(100);

/// Run the interactive front-end until the user quits.
///
/// Input, poll events and ticks are multiplexed on the current task; the
/// session is only touched between awaits.
pub async fn run<C: Submitter + StatusSource>(
    session: &mut GenerationSession<C>,
    defaults: &RequestDefaults,
    service: &str,
) -> io::Result<()> {
    let (mut terminal, guard) = setup_terminal()?;
    let mut app = App::new(defaults);
    let mut events = EventHandler::new(TICK_RATE);

    if let Ok((cols, rows)) = crossterm::terminal::size() {
        app.on_resize(cols, rows);
    }

    loop {
        app.sync(session.state());
        terminal.draw(|frame| draw(frame, &app, session.state(), service))?;
        if app.should_quit() {
            break;
        }

        tokio::select! {
            event = events.next() => {
                let Some(event) = event else {
                    break;
                };
                match event {
                    AppEvent::Key(key) => {
                        match handle_key(&mut app, session.state(), key) {
                            InputAction::None => {}
                            InputAction::Submit(request) => {
                                app.form_mut().submitting = true;
                                terminal.draw(|frame| draw(frame, &app, session.state(), service))?;
                                // Failure is reflected in the session state.
                                let _ = session.submit(&request).await;
                            }
                            InputAction::Reset => session.reset(),
                            InputAction::Quit => app.request_quit(),
                        }
                    }
                    AppEvent::Paste(text) => {
                        if session.state().is_idle() {
                            app.on_paste(&text);
                        }
                    }
                    AppEvent::Tick => session.tick(),
                    AppEvent::Resize(cols, rows) => app.on_resize(cols, rows),
                }
            }
            Some(event) = session.next_event() => {
                session.apply(event);
            }
        }
    }

    session.reset();
    drop(events);
    drop(guard);
    Ok(())
}
