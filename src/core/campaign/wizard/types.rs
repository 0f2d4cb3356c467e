//! Wizard step definitions.

/// The four linear steps of fundraiser creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WizardStep {
    #[default]
    Details,
    Image,
    Participation,
    Prizes,
}

impl WizardStep {
    pub const ALL: [WizardStep; 4] = [
        WizardStep::Details,
        WizardStep::Image,
        WizardStep::Participation,
        WizardStep::Prizes,
    ];

    pub const LAST: usize = Self::ALL.len() - 1;

    pub fn index(self) -> usize {
        match self {
            WizardStep::Details => 0,
            WizardStep::Image => 1,
            WizardStep::Participation => 2,
            WizardStep::Prizes => 3,
        }
    }

    /// Step for `index`, clamped into range.
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index.min(Self::LAST)]
    }

    pub fn label(self) -> &'static str {
        match self {
            WizardStep::Details => "Main - Details",
            WizardStep::Image => "Images - Upload",
            WizardStep::Participation => "Participation - Details",
            WizardStep::Prizes => "Prizes - Details",
        }
    }

    pub fn is_last(self) -> bool {
        self.index() == Self::LAST
    }
}
