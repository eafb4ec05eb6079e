use crate::observable::{Command, Observable};

/// View-model for the navigation help button.
///
/// Holds the observable state the widget binds against and the toggle
/// command the button invokes. Carries no DOM references, so it can be
/// driven and asserted on without any document.
pub struct NavigationHelpButtonViewModel {
    /// Whether the instructions panel is visible.
    pub show_instructions: Observable<bool>,
    /// Tooltip shown on the toolbar button.
    pub tooltip: Observable<String>,
    command: Command,
}

impl NavigationHelpButtonViewModel {
    pub fn new() -> Self {
        let show_instructions = Observable::new(false);
        let tooltip = Observable::new("Navigation Instructions".to_string());

        let toggled = show_instructions.clone();
        let command = Command::new(move || toggled.set(!toggled.get()));

        NavigationHelpButtonViewModel {
            show_instructions,
            tooltip,
            command,
        }
    }

    /// Command that inverts `show_instructions`.
    pub fn command(&self) -> &Command {
        &self.command
    }
}

impl Default for NavigationHelpButtonViewModel {
    fn default() -> Self {
        Self::new()
    }
}
