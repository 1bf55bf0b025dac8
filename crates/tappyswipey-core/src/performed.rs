//! Records of actions the player actually performed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::actions::ActionDefinition;

/// Device orientation at the moment a gesture fired.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    #[default]
    Unknown,
    Portrait,
    PortraitUpsideDown,
    LandscapeLeft,
    LandscapeRight,
    FaceUp,
    FaceDown,
}

impl Orientation {
    pub fn label(&self) -> &'static str {
        match self {
            Orientation::Unknown => "Unknown",
            Orientation::Portrait => "Portrait",
            Orientation::PortraitUpsideDown => "Upside Down",
            Orientation::LandscapeLeft => "Landscape Left",
            Orientation::LandscapeRight => "Landscape Right",
            Orientation::FaceUp => "Face Up",
            Orientation::FaceDown => "Face Down",
        }
    }
}

impl std::str::FromStr for Orientation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "unknown" => Ok(Orientation::Unknown),
            "portrait" => Ok(Orientation::Portrait),
            "portrait_upside_down" | "upside_down" => Ok(Orientation::PortraitUpsideDown),
            "landscape_left" => Ok(Orientation::LandscapeLeft),
            "landscape_right" => Ok(Orientation::LandscapeRight),
            "face_up" => Ok(Orientation::FaceUp),
            "face_down" => Ok(Orientation::FaceDown),
            other => Err(format!("unknown orientation: {other}")),
        }
    }
}

/// One firing of a catalog action.
#[derive(Debug, Clone, Serialize)]
pub struct PerformedAction {
    pub action: &'static ActionDefinition,
    pub context: Orientation,
    pub description: String,
    pub at: DateTime<Utc>,
}

impl PerformedAction {
    /// Record a firing. With `qualify` set and a known orientation, the
    /// description becomes e.g. `"Single Tap (Landscape Left)"`; otherwise it
    /// is the bare title.
    pub fn new(action: &'static ActionDefinition, context: Orientation, qualify: bool) -> Self {
        let description = if qualify && context != Orientation::Unknown {
            format!("{} ({})", action.title, context.label())
        } else {
            action.title.clone()
        };
        Self {
            action,
            context,
            description,
            at: Utc::now(),
        }
    }

    pub fn title(&self) -> &str {
        &self.action.title
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::{Catalog, Gesture};

    fn single_tap() -> &'static ActionDefinition {
        Catalog::global()
            .lookup(&Gesture::Tap { touches: 1, taps: 1 })
            .unwrap()
    }

    #[test]
    fn description_is_title_by_default() {
        let performed = PerformedAction::new(single_tap(), Orientation::LandscapeLeft, false);
        assert_eq!(performed.description, "Single Tap");
        assert_eq!(performed.context, Orientation::LandscapeLeft);
    }

    #[test]
    fn description_qualified_with_orientation() {
        let performed = PerformedAction::new(single_tap(), Orientation::LandscapeLeft, true);
        assert_eq!(performed.description, "Single Tap (Landscape Left)");
    }

    #[test]
    fn unknown_orientation_is_never_qualified() {
        let performed = PerformedAction::new(single_tap(), Orientation::Unknown, true);
        assert_eq!(performed.description, "Single Tap");
    }

    #[test]
    fn orientation_parses_kebab_and_snake_case() {
        assert_eq!("landscape-left".parse(), Ok(Orientation::LandscapeLeft));
        assert_eq!("face_down".parse(), Ok(Orientation::FaceDown));
        assert!("diagonal".parse::<Orientation>().is_err());
    }
}
