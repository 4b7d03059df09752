use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use folio_shared::{api::ProfileInput, vcard::Variant, Profile};
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::api::ProfileApi;
use crate::cache::{portfolio_link, ProfileCache};
use crate::config::Config;
use crate::{editor, export};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    ProfileList,
    Portfolio(Uuid),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
}

#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Tick,
    LoadProfiles,
}

pub struct App<A> {
    pub cache: ProfileCache<A>,
    pub config: Config,
    pub view: View,
    pub input_mode: InputMode,

    // Profile list state
    pub search: String,
    pub selected: usize,
    pub confirming_delete: bool,

    // Loading state
    pub loading: bool,
    pub loading_message: String,
    pub error_message: Option<String>,
    pub status_message: Option<String>,

    /// Set after the external editor ran so the main loop redraws from scratch
    pub needs_terminal_clear: bool,
}

impl<A: ProfileApi> App<A> {
    pub fn new(cache: ProfileCache<A>, config: Config) -> Self {
        Self {
            cache,
            config,
            view: View::ProfileList,
            input_mode: InputMode::Normal,
            search: String::new(),
            selected: 0,
            confirming_delete: false,
            loading: false,
            loading_message: String::new(),
            error_message: None,
            status_message: None,
            needs_terminal_clear: false,
        }
    }

    pub fn set_loading(&mut self, loading: bool, message: &str) {
        self.loading = loading;
        self.loading_message = message.to_string();
    }

    pub fn set_error(&mut self, message: String) {
        self.error_message = Some(message);
    }

    pub fn clear_error(&mut self) {
        self.error_message = None;
    }

    /// Profiles matching the current search, in list order
    pub fn visible_profiles(&self) -> Vec<&Profile> {
        self.cache.filter(&self.search)
    }

    pub fn selected_profile(&self) -> Option<&Profile> {
        self.visible_profiles().get(self.selected).copied()
    }

    /// Profile shown by the portfolio view
    pub fn current_profile(&self) -> Option<&Profile> {
        match self.view {
            View::Portfolio(id) => self.cache.get(id),
            View::ProfileList => None,
        }
    }

    pub async fn load_profiles(&mut self) {
        self.set_loading(true, "Loading profiles...");

        if let Some(notice) = self.cache.load().await.notice() {
            self.set_error(notice.to_string());
        }
        self.clamp_selection();

        self.set_loading(false, "");
    }

    /// Handle key events, returns true if app should quit
    pub async fn handle_key(&mut self, key: KeyEvent, tx: mpsc::Sender<AppEvent>) -> Result<bool> {
        // Clear messages on any key press
        if self.error_message.is_some() && key.code != KeyCode::Esc {
            self.clear_error();
        }
        self.status_message = None;

        // Global quit with Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Ok(true);
        }

        if self.loading {
            return Ok(false);
        }

        match self.view {
            View::ProfileList if self.confirming_delete => {
                self.handle_delete_confirm_key(key).await
            }
            View::ProfileList => match self.input_mode {
                InputMode::Search => {
                    self.handle_search_key(key);
                    Ok(false)
                }
                InputMode::Normal => self.handle_list_key(key, tx).await,
            },
            View::Portfolio(_) => Ok(self.handle_portfolio_key(key)),
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.search.clear();
                self.input_mode = InputMode::Normal;
            }
            KeyCode::Enter => self.input_mode = InputMode::Normal,
            KeyCode::Backspace => {
                self.search.pop();
            }
            KeyCode::Char(c) => self.search.push(c),
            _ => {}
        }
        self.selected = 0;
    }

    async fn handle_list_key(&mut self, key: KeyEvent, tx: mpsc::Sender<AppEvent>) -> Result<bool> {
        match key.code {
            KeyCode::Char('q') => return Ok(true),
            KeyCode::Char('/') => self.input_mode = InputMode::Search,
            KeyCode::Char('j') | KeyCode::Down => self.move_down(),
            KeyCode::Char('k') | KeyCode::Up => self.move_up(),
            KeyCode::Enter => {
                if let Some(profile) = self.selected_profile() {
                    self.view = View::Portfolio(profile.id);
                }
            }
            KeyCode::Char('n') => self.create_profile().await,
            KeyCode::Char('e') => self.edit_selected().await,
            KeyCode::Char('d') => {
                if self.selected_profile().is_some() {
                    self.confirming_delete = true;
                }
            }
            KeyCode::Char('y') => {
                if let Some(id) = self.selected_profile().map(|p| p.id) {
                    self.show_link(id);
                }
            }
            KeyCode::Char('r') => {
                let _ = tx.send(AppEvent::LoadProfiles).await;
            }
            _ => {}
        }

        Ok(false)
    }

    async fn handle_delete_confirm_key(&mut self, key: KeyEvent) -> Result<bool> {
        match key.code {
            KeyCode::Char('y') => {
                self.confirming_delete = false;
                self.delete_selected().await;
            }
            KeyCode::Char('n') | KeyCode::Esc => self.confirming_delete = false,
            _ => {}
        }

        Ok(false)
    }

    fn handle_portfolio_key(&mut self, key: KeyEvent) -> bool {
        let Some(id) = self.current_profile().map(|p| p.id) else {
            self.view = View::ProfileList;
            return false;
        };

        match key.code {
            KeyCode::Char('q') => return true,
            KeyCode::Backspace | KeyCode::Esc => self.view = View::ProfileList,
            KeyCode::Char('s') => self.export_current(Variant::Portfolio),
            KeyCode::Char('c') => self.export_current(Variant::Contact),
            KeyCode::Char('y') => self.show_link(id),
            _ => {}
        }

        false
    }

    async fn create_profile(&mut self) {
        let Some(input) = self.run_editor(&ProfileInput::default()) else {
            return;
        };

        self.set_loading(true, "Creating profile...");
        match self.cache.add(input).await {
            Ok(id) => {
                self.search.clear();
                self.selected = self.cache.profiles().len().saturating_sub(1);
                self.status_message = Some(format!(
                    "Profile created. Share link: {}",
                    portfolio_link(&self.config.public_url, id)
                ));
            }
            Err(e) => self.set_error(e.to_string()),
        }
        self.set_loading(false, "");
    }

    async fn edit_selected(&mut self) {
        let Some(profile) = self.selected_profile() else {
            return;
        };
        let id = profile.id;
        let current = ProfileInput::from(profile);

        let Some(input) = self.run_editor(&current) else {
            return;
        };

        self.set_loading(true, "Saving profile...");
        match self.cache.update(id, input).await {
            Ok(()) => self.status_message = Some("Profile updated".to_string()),
            Err(e) => self.set_error(e.to_string()),
        }
        self.clamp_selection();
        self.set_loading(false, "");
    }

    async fn delete_selected(&mut self) {
        let Some(id) = self.selected_profile().map(|p| p.id) else {
            return;
        };

        self.set_loading(true, "Deleting profile...");
        match self.cache.remove(id).await {
            Ok(()) => self.status_message = Some("Profile deleted".to_string()),
            Err(e) => self.set_error(e.to_string()),
        }
        self.clamp_selection();
        self.set_loading(false, "");
    }

    /// Open the profile document in `$EDITOR`; `None` when there is nothing to save
    fn run_editor(&mut self, input: &ProfileInput) -> Option<ProfileInput> {
        let result = editor::edit_profile(input);
        self.needs_terminal_clear = true;

        match result {
            Ok(Some(input)) => Some(input),
            Ok(None) => {
                self.status_message = Some("No changes".to_string());
                None
            }
            Err(e) => {
                self.set_error(format!("Editor failed: {:#}", e));
                None
            }
        }
    }

    fn show_link(&mut self, id: Uuid) {
        self.status_message = Some(portfolio_link(&self.config.public_url, id));
    }

    fn export_current(&mut self, variant: Variant) {
        let Some(profile) = self.current_profile() else {
            return;
        };

        match export::write_vcard(&self.config.export_dir, profile, variant) {
            Ok(path) => self.status_message = Some(format!("Saved {}", path.display())),
            Err(e) => self.set_error(format!("{:#}", e)),
        }
    }

    fn clamp_selection(&mut self) {
        let count = self.visible_profiles().len();
        if self.selected >= count {
            self.selected = count.saturating_sub(1);
        }
    }

    pub fn move_up(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    pub fn move_down(&mut self) {
        if self.selected < self.visible_profiles().len().saturating_sub(1) {
            self.selected += 1;
        }
    }
}
