//! Key event handling

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use crate::model::Tab;

use super::AppController;

impl AppController {
    pub async fn handle_key_event(&self, key: KeyEvent) -> Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        let model = self.model.lock().await;

        // Handle error message first (blocks all other interactions)
        if model.has_error().await {
            return match key.code {
                KeyCode::Esc | KeyCode::Enter => {
                    model.clear_error().await;
                    Ok(())
                }
                _ => Ok(()),
            };
        }

        // Handle help popup
        if model.is_help_popup_open().await {
            return match key.code {
                KeyCode::Esc | KeyCode::Char('h') | KeyCode::Char('H') => {
                    model.hide_help_popup().await;
                    Ok(())
                }
                _ => Ok(()),
            };
        }

        // Sidebar focus captures up/down/enter, remote style.
        if model.is_sidebar_focused().await {
            drop(model);
            match key.code {
                KeyCode::Up => self.sidebar_move(-1).await,
                KeyCode::Down => self.sidebar_move(1).await,
                KeyCode::Enter => self.sidebar_confirm().await,
                KeyCode::Right | KeyCode::Esc => self.blur_sidebar().await,
                KeyCode::Char('q') | KeyCode::Char('Q') => {
                    let model = self.model.lock().await;
                    model.set_should_quit(true).await;
                }
                _ => {}
            }
            return Ok(());
        }

        // Screen-local keybindings
        let active_tab = model.active_tab().await;
        drop(model);

        match active_tab {
            Tab::Home => match key.code {
                KeyCode::Up => {
                    self.scroll_feed(-1).await;
                    return Ok(());
                }
                KeyCode::Down => {
                    self.scroll_feed(1).await;
                    return Ok(());
                }
                KeyCode::PageUp | KeyCode::Char('k') | KeyCode::Char('K') => {
                    self.page_feed(-1).await;
                    return Ok(());
                }
                KeyCode::PageDown | KeyCode::Char('j') | KeyCode::Char('J') => {
                    self.page_feed(1).await;
                    return Ok(());
                }
                KeyCode::Char(' ') | KeyCode::Enter => {
                    self.toggle_current_item().await;
                    return Ok(());
                }
                _ => {}
            },
            Tab::Shows => match key.code {
                KeyCode::Left => {
                    self.shows_move(-1).await;
                    return Ok(());
                }
                KeyCode::Right => {
                    self.shows_move(1).await;
                    return Ok(());
                }
                KeyCode::Up => {
                    self.shows_row(false).await;
                    return Ok(());
                }
                KeyCode::Down => {
                    self.shows_row(true).await;
                    return Ok(());
                }
                KeyCode::Enter => {
                    self.shows_select().await;
                    return Ok(());
                }
                _ => {}
            },
            _ => {}
        }

        // Global keybindings
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                let model = self.model.lock().await;
                model.set_should_quit(true).await;
            }
            KeyCode::Tab => {
                self.cycle_tab(true).await;
            }
            KeyCode::BackTab => {
                self.cycle_tab(false).await;
            }
            KeyCode::Left | KeyCode::Esc => {
                self.focus_sidebar().await;
            }
            KeyCode::Char('h') | KeyCode::Char('H') => {
                let model = self.model.lock().await;
                model.show_help_popup().await;
            }
            _ => {}
        }
        Ok(())
    }
}
