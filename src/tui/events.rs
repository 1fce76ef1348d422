use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
    size as terminal_size,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use std::io;
use std::time::Duration;

use crate::tui::App;
use crate::tui::app::{InputTarget, Mode, Tab};
use crate::tui::error::TuiError;
use crate::tui::layout::Layout;

/// Guard that ensures terminal state is restored even on panic
/// If the terminal is left in raw mode or the alternate screen, the user's
/// shell is unusable.
struct TerminalGuard {
    raw_mode_enabled: bool,
    alternate_screen_enabled: bool,
}

impl TerminalGuard {
    fn new() -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

        Ok(Self {
            raw_mode_enabled: true,
            alternate_screen_enabled: true,
        })
    }

    /// Manually restore terminal state (called on normal exit)
    /// After calling this, the guard will do nothing on drop
    fn restore(&mut self) -> Result<(), TuiError> {
        if self.raw_mode_enabled {
            disable_raw_mode()?;
            self.raw_mode_enabled = false;
        }
        if self.alternate_screen_enabled {
            execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen)?;
            self.alternate_screen_enabled = false;
        }
        Ok(())
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        // Ignore errors in drop - we're already in a cleanup path
        if self.raw_mode_enabled {
            let _ = disable_raw_mode();
        }
        if self.alternate_screen_enabled {
            let _ = execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen);
        }
    }
}

pub fn run_event_loop(mut app: App) -> Result<(), TuiError> {
    // Check terminal size before entering alternate screen
    // so the error is readable in the normal terminal
    let (width, height) = terminal_size()?;
    let min_width_with_border = Layout::MIN_WIDTH + 2;
    let min_height_with_border = Layout::MIN_HEIGHT + 2;

    if width < min_width_with_border || height < min_height_with_border {
        return Err(TuiError::RenderError(format!(
            "Terminal size too small. Current: {}x{}, Minimum required: {}x{}. Please resize your terminal window.",
            width, height, min_width_with_border, min_height_with_border
        )));
    }

    let mut guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;
    tracing::debug!("terminal ready");

    loop {
        app.tick();
        app.check_status_message_timeout();

        let terminal_size = terminal.size()?;
        let terminal_rect = Rect::new(0, 0, terminal_size.width, terminal_size.height);
        terminal.draw(|f| {
            let layout = Layout::calculate(terminal_rect);
            crate::tui::render::render(f, &mut app, &layout);
        })?;

        // Only process Press events to avoid duplicate processing on Windows
        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                    handle_key_event(&mut app, key_event);
                }
                Event::Mouse(mouse_event) => handle_mouse_event(&mut app, mouse_event),
                // The next draw picks up the new size
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }

    app.profile.commit();
    guard.restore()?;
    tracing::info!("tui closed");

    Ok(())
}

fn handle_mouse_event(app: &mut App, mouse_event: MouseEvent) {
    match mouse_event.kind {
        MouseEventKind::Down(MouseButton::Left) => app.begin_drag(mouse_event.column),
        MouseEventKind::Up(MouseButton::Left) => app.end_drag(mouse_event.column),
        MouseEventKind::ScrollDown => app.move_selection(1),
        MouseEventKind::ScrollUp => app.move_selection(-1),
        _ => {}
    }
}

pub fn handle_key_event(app: &mut App, key_event: KeyEvent) {
    match app.mode {
        Mode::Help => {
            if key_event.code == KeyCode::Esc || app.bindings.help.matches(&key_event) {
                app.mode = Mode::View;
            }
        }
        Mode::Input(target) => handle_input_key(app, target, key_event),
        Mode::ConfirmLogout => match key_event.code {
            KeyCode::Char('y') | KeyCode::Enter => app.confirm_logout(),
            KeyCode::Char('n') | KeyCode::Esc => app.mode = Mode::View,
            _ => {}
        },
        Mode::Reward => {
            if matches!(key_event.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
                app.collect_reward();
            }
        }
        Mode::View => handle_view_key(app, key_event),
    }
}

fn handle_input_key(app: &mut App, target: InputTarget, key_event: KeyEvent) {
    match key_event.code {
        KeyCode::Esc => app.cancel_input(),
        KeyCode::Enter => app.submit_input(),
        KeyCode::Backspace => app.input_backspace(),
        KeyCode::Char(c) if !key_event.modifiers.contains(KeyModifiers::CONTROL) => {
            // Codes are digits only
            if target != InputTarget::Otp || c.is_ascii_digit() {
                app.input_char(c);
            }
        }
        _ => {}
    }
}

fn handle_view_key(app: &mut App, key_event: KeyEvent) {
    let b = app.bindings.clone();

    if b.quit.matches(&key_event) {
        app.should_quit = true;
    } else if b.help.matches(&key_event) {
        app.mode = Mode::Help;
    } else if b.tab_right.matches(&key_event) {
        app.next_tab();
    } else if b.tab_left.matches(&key_event) {
        app.previous_tab();
    } else if b.list_up.matches(&key_event) || key_event.code == KeyCode::Up {
        app.move_selection(-1);
    } else if b.list_down.matches(&key_event) || key_event.code == KeyCode::Down {
        app.move_selection(1);
    } else if b.new.matches(&key_event) {
        app.start_new();
    } else if b.delete.matches(&key_event) {
        app.delete_selected();
    } else if b.toggle.matches(&key_event) {
        app.toggle_selected();
    } else if b.select.matches(&key_event) {
        app.activate_selected();
    } else if b.complete_day.matches(&key_event) && app.current_tab == Tab::Milestones {
        app.complete_today();
    } else if b.prev_day.matches(&key_event) {
        step_sideways(app, false);
    } else if b.next_day.matches(&key_event) {
        step_sideways(app, true);
    } else if b.jump_today.matches(&key_event) && app.current_tab == Tab::Planner {
        app.jump_to_today();
    } else if b.volume_up.matches(&key_event) {
        app.adjust_volume(true);
    } else if b.volume_down.matches(&key_event) {
        app.adjust_volume(false);
    } else if let KeyCode::Char(c @ '1'..='5') = key_event.code {
        let index = c as usize - '1' as usize;
        app.select_tab(Tab::ALL[index]);
    }
}

/// Day keys move the planner date, or the shop shelf on the Pet Shop tab.
fn step_sideways(app: &mut App, forward: bool) {
    match app.current_tab {
        Tab::Planner => app.shift_selected_date(forward),
        Tab::PetShop => app.shift_shop_tab(forward),
        _ => {}
    }
}
