//! Application state definitions
//!
//! Contains the profile form state, the dialogs stacked on top of it and the
//! key-driven transitions between them. Nothing in here touches the terminal.

use std::collections::VecDeque;
use std::fs;
use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use strum::IntoEnumIterator;

use crate::components::keybindings::{KeyAction, KeybindingContext};
use crate::config_file::{ANSWER_FILE_NAME, AnswerFile};
use crate::engine::partition::{self, Volume};
use crate::error::KickstartError;
use crate::hardware::{DiskInventory, SystemInfo};
use crate::kickstart;
use crate::logic::resolver::{self, ResolveWarning};
use crate::logic::validation;
use crate::profiles::Profile;
use crate::request::RequestBuilder;
use crate::theme::Severity;
use crate::types::{ClassificationLevel, NetworkMode, SiteConfig};

/// Percent step for PgUp/PgDn on a volume.
const VOLUME_STEP: i16 = 5;

/// Application operating modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppMode {
    /// Editing the profile form
    Form,
    /// Password entered twice before generation
    Password,
    /// A blocking message waits for acknowledgement
    Notice,
    /// Artifacts written; any key exits
    Complete,
}

/// One focusable row of the form, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Profile,
    Classification,
    Hostname,
    Ip,
    Netmask,
    Disk(usize),
    Encrypt,
    Tim,
    Core,
    Volume(Volume),
    Submit,
}

impl FormField {
    /// Rows edited by typing.
    pub fn is_text(self) -> bool {
        matches!(self, Self::Hostname | Self::Ip | Self::Netmask)
    }
}

/// Blocking message shown over the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub message: String,
    pub severity: Severity,
}

impl Notice {
    pub fn new(title: impl Into<String>, message: impl Into<String>, severity: Severity) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            severity,
        }
    }
}

/// Double password entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PasswordDialog {
    pub first: String,
    pub second: String,
    /// Typing goes to the confirmation entry.
    pub focus_second: bool,
}

impl PasswordDialog {
    fn entry_mut(&mut self) -> &mut String {
        if self.focus_second {
            &mut self.second
        } else {
            &mut self.first
        }
    }
}

/// Main application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Everything the form edits
    pub builder: RequestBuilder,
    pub inventory: DiskInventory,
    pub system: SystemInfo,
    /// Index into [`AppState::fields`]
    pub focus: usize,
    pub tim: bool,
    pub core: bool,
    /// Pending notices, oldest first
    pub notices: VecDeque<Notice>,
    pub password: Option<PasswordDialog>,
    /// Whether help overlay is visible
    pub help_visible: bool,
    /// Status message for user feedback
    pub status_message: String,
    /// Where artifacts and saved answers go
    pub output_dir: PathBuf,
    /// Files written by a successful submit
    pub written: Option<Vec<PathBuf>>,
    /// Budget state after the last percentage change
    was_over: bool,
}

impl AppState {
    /// Start on the default profile with every detected disk selected.
    ///
    /// Warnings for the default profile (e.g. a disk too small for it) are
    /// queued straight away.
    pub fn new(inventory: DiskInventory, system: SystemInfo, output_dir: PathBuf) -> Self {
        let builder = RequestBuilder::new(Profile::default()).with_inventory(&inventory);
        let mut state = Self::from_builder(builder, inventory, system, output_dir);
        state.queue_profile_warnings();
        state
    }

    /// Resume from an existing form state (e.g. a loaded answer file).
    pub fn from_builder(
        builder: RequestBuilder,
        inventory: DiskInventory,
        system: SystemInfo,
        output_dir: PathBuf,
    ) -> Self {
        let was_over = builder.plan.budget().is_over();
        let (tim, core) = (
            builder.site == SiteConfig::Tim,
            builder.site == SiteConfig::Core,
        );
        Self {
            builder,
            inventory,
            system,
            focus: 0,
            tim,
            core,
            notices: VecDeque::new(),
            password: None,
            help_visible: false,
            status_message: "F12 generates the kickstart files".to_string(),
            output_dir,
            written: None,
            was_over,
        }
    }

    /// The mode that currently receives keys.
    pub fn mode(&self) -> AppMode {
        if self.written.is_some() {
            AppMode::Complete
        } else if !self.notices.is_empty() {
            AppMode::Notice
        } else if self.password.is_some() {
            AppMode::Password
        } else {
            AppMode::Form
        }
    }

    /// Focusable rows for the current profile.
    pub fn fields(&self) -> Vec<FormField> {
        let mut fields = vec![
            FormField::Profile,
            FormField::Classification,
            FormField::Hostname,
        ];
        if self.builder.profile.spec().network == NetworkMode::Static {
            fields.extend([FormField::Ip, FormField::Netmask]);
        }
        fields.extend((0..self.builder.disks.len()).map(FormField::Disk));
        fields.extend([FormField::Encrypt, FormField::Tim, FormField::Core]);
        fields.extend(Volume::iter().map(FormField::Volume));
        fields.push(FormField::Submit);
        fields
    }

    pub fn focused(&self) -> FormField {
        let fields = self.fields();
        fields[self.focus.min(fields.len() - 1)]
    }

    /// Total capacity the resolver measures against.
    pub fn disk_total_gb(&self) -> u64 {
        self.inventory.total_gb()
    }

    /// Queue a notice; it blocks input until dismissed.
    pub fn notify(&mut self, notice: Notice) {
        tracing::debug!("Notice: {} - {}", notice.title, notice.message);
        self.notices.push_back(notice);
    }

    fn notify_error(&mut self, error: &KickstartError) {
        let (title, severity) = match error {
            KickstartError::Overbudget(_) | KickstartError::VolumeOutOfRange { .. } => {
                ("Partitioning", Severity::Warning)
            }
            KickstartError::PasswordMismatch | KickstartError::PasswordTooShort { .. } => {
                ("Password", Severity::Warning)
            }
            e if e.is_input_error() => ("Invalid Input", Severity::Warning),
            _ => ("Error", Severity::Danger),
        };
        self.notify(Notice::new(title, error.to_string(), severity));
    }

    // ========================================================================
    // Key handling
    // ========================================================================

    /// Handle one key press. Returns true when the program should exit.
    pub fn handle_key(&mut self, key: KeyEvent, bindings: &KeybindingContext) -> bool {
        let mode = self.mode();
        let action = bindings.action_for(&mode, &key);

        if self.help_visible {
            if matches!(action, Some(KeyAction::Help)) || key.code == KeyCode::Esc {
                self.help_visible = false;
            }
            return false;
        }

        match action {
            Some(KeyAction::Quit) => {
                tracing::info!("Quit requested in {:?} mode", mode);
                return true;
            }
            Some(KeyAction::Help) => {
                self.help_visible = true;
                return false;
            }
            _ => {}
        }

        match mode {
            AppMode::Complete => true,
            AppMode::Notice => {
                if action == Some(KeyAction::Dismiss) {
                    self.notices.pop_front();
                }
                false
            }
            AppMode::Password => {
                self.handle_password_key(key, action);
                false
            }
            AppMode::Form => {
                self.handle_form_key(key, action);
                false
            }
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent, action: Option<KeyAction>) {
        let field = self.focused();

        if field.is_text() && !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        {
            match key.code {
                KeyCode::Char(c) => {
                    self.text_mut(field).push(c);
                    return;
                }
                KeyCode::Backspace => {
                    self.text_mut(field).pop();
                    return;
                }
                _ => {}
            }
        }

        let Some(action) = action else { return };
        match action {
            KeyAction::NavigateUp => self.move_focus(-1),
            KeyAction::NavigateDown => self.move_focus(1),
            KeyAction::Decrease => self.change(field, -1),
            KeyAction::Increase => self.change(field, 1),
            KeyAction::StepDown => self.change_volume(field, -VOLUME_STEP),
            KeyAction::StepUp => self.change_volume(field, VOLUME_STEP),
            KeyAction::Toggle => self.toggle(field),
            KeyAction::Submit => self.open_password_dialog(),
            KeyAction::Save => self.save_answers(),
            _ => {}
        }
    }

    fn text_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Ip => &mut self.builder.static_network.ip,
            FormField::Netmask => &mut self.builder.static_network.netmask,
            _ => &mut self.builder.hostname,
        }
    }

    fn move_focus(&mut self, delta: isize) {
        let len = self.fields().len();
        let current = self.focus.min(len - 1);
        self.focus = current.saturating_add_signed(delta).min(len - 1);
    }

    /// Left/Right on a row.
    fn change(&mut self, field: FormField, delta: i16) {
        match field {
            FormField::Profile => {
                let count = Profile::iter().count();
                let index = self.builder.profile.index();
                let next = if delta < 0 {
                    (index + count - 1) % count
                } else {
                    (index + 1) % count
                };
                if let Some(profile) = Profile::from_index(next) {
                    self.select_profile(profile);
                }
            }
            FormField::Classification => {
                let levels: Vec<ClassificationLevel> = ClassificationLevel::iter().collect();
                let index = levels
                    .iter()
                    .position(|l| *l == self.builder.classification)
                    .unwrap_or(0);
                let next = if delta < 0 {
                    (index + levels.len() - 1) % levels.len()
                } else {
                    (index + 1) % levels.len()
                };
                self.builder.classification = levels[next];
            }
            FormField::Volume(_) => self.change_volume(field, delta),
            _ => {}
        }
    }

    /// Switch profile, reload its plan and surface resolver warnings.
    pub fn select_profile(&mut self, profile: Profile) {
        self.builder.set_profile(profile);
        self.was_over = self.builder.plan.budget().is_over();
        self.queue_profile_warnings();

        // Static rows appear or vanish with the profile
        let len = self.fields().len();
        self.focus = self.focus.min(len - 1);
        self.status_message = format!("Profile: {}", profile.name());
        tracing::info!("Selected profile {}", profile);
    }

    fn queue_profile_warnings(&mut self) {
        let resolution = resolver::resolve(self.builder.profile, self.disk_total_gb());
        for warning in &resolution.warnings {
            let (title, severity) = match warning {
                ResolveWarning::LowDiskSpace { .. } => ("Low Disk Space", Severity::Warning),
                ResolveWarning::HardeningDeferred => ("Hardening Deferred", Severity::Danger),
            };
            self.notify(Notice::new(title, warning.to_string(), severity));
        }
    }

    fn change_volume(&mut self, field: FormField, delta: i16) {
        let FormField::Volume(volume) = field else {
            return;
        };
        let value = self.builder.plan.adjust(volume, delta);
        let status = partition::validate(&self.builder.plan);
        if status.is_over() && !self.was_over {
            self.notify(Notice::new(
                "Partitioning",
                KickstartError::Overbudget(status.used()).to_string(),
                Severity::Warning,
            ));
        }
        self.was_over = status.is_over();
        self.status_message = format!("{} set to {}% ({}% used)", volume, value, status.used());
    }

    fn toggle(&mut self, field: FormField) {
        match field {
            FormField::Disk(i) => {
                if let Some(disk) = self.builder.disks.get_mut(i) {
                    disk.selected = !disk.selected;
                }
            }
            FormField::Encrypt => self.builder.encrypt = !self.builder.encrypt,
            FormField::Tim => {
                self.tim = !self.tim;
                self.sync_site();
            }
            FormField::Core => {
                self.core = !self.core;
                self.sync_site();
            }
            FormField::Submit => self.open_password_dialog(),
            _ => {}
        }
    }

    fn sync_site(&mut self) {
        match SiteConfig::from_toggles(self.tim, self.core) {
            Some(site) => self.builder.site = site,
            None => {
                self.notify(Notice::new(
                    "Site Configuration",
                    "Can not have both TIM and CORE install!",
                    Severity::Danger,
                ));
                self.tim = false;
                self.core = false;
                self.builder.site = SiteConfig::None;
            }
        }
    }

    fn save_answers(&mut self) {
        let path = self.output_dir.join(ANSWER_FILE_NAME);
        let result = fs::create_dir_all(&self.output_dir)
            .map_err(anyhow::Error::from)
            .and_then(|_| AnswerFile::from_builder(&self.builder).save_to_file(&path));
        match result {
            Ok(()) => {
                tracing::info!("Saved answers to {:?}", path);
                self.status_message = format!("Saved answers to {}", path.display());
            }
            Err(e) => {
                tracing::error!("Saving answers failed: {:#}", e);
                self.notify(Notice::new("Save Failed", format!("{:#}", e), Severity::Danger));
            }
        }
    }

    // ========================================================================
    // Password dialog and submit
    // ========================================================================

    fn open_password_dialog(&mut self) {
        self.password = Some(PasswordDialog::default());
    }

    fn handle_password_key(&mut self, key: KeyEvent, action: Option<KeyAction>) {
        let Some(dialog) = self.password.as_mut() else {
            return;
        };

        if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
            match key.code {
                KeyCode::Char(c) => {
                    dialog.entry_mut().push(c);
                    return;
                }
                KeyCode::Backspace => {
                    dialog.entry_mut().pop();
                    return;
                }
                _ => {}
            }
        }

        match action {
            Some(KeyAction::SwitchField) => dialog.focus_second = !dialog.focus_second,
            Some(KeyAction::Confirm) if !dialog.focus_second => dialog.focus_second = true,
            Some(KeyAction::Confirm) => self.confirm_password(),
            Some(KeyAction::Cancel) => {
                self.password = None;
                self.status_message = "Generation cancelled".to_string();
            }
            _ => {}
        }
    }

    fn confirm_password(&mut self) {
        let Some(dialog) = self.password.take() else {
            return;
        };
        match validation::check_password(&dialog.first, &dialog.second) {
            Ok(Some(password)) => self.submit(&password),
            Ok(None) => {
                tracing::info!("Empty password, generation cancelled");
                self.status_message = "Generation cancelled".to_string();
            }
            Err(e) => {
                self.notify_error(&e);
                self.open_password_dialog();
            }
        }
    }

    /// Gate, hash, emit and write. Every failure becomes a notice.
    fn submit(&mut self, password: &str) {
        let problems = self.builder.validate();
        if !problems.is_empty() {
            tracing::warn!("Submit blocked by {} problem(s)", problems.len());
            for problem in &problems {
                self.notify_error(problem);
            }
            return;
        }

        let request = match self.builder.build(password) {
            Ok(request) => request,
            Err(e) => {
                self.notify_error(&e);
                return;
            }
        };

        let artifacts = kickstart::emit(&request);
        match artifacts.write_all(&self.output_dir) {
            Ok(paths) => {
                self.status_message = format!("Wrote {} files", paths.len());
                self.written = Some(paths);
            }
            Err(e) => {
                tracing::error!("Writing artifacts failed: {}", e);
                self.notify_error(&e);
            }
        }
    }
}
