//! Presentation model for the roller screen.

use crate::color::{to_hex, Rgb, ValueColors};
use crate::RollState;

/// Static texts and colours of the screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderConfig {
    /// Top bar title
    pub title: String,
    /// Button label while idle
    pub roll_label: String,
    /// Button label while a roll is animating
    pub rolling_label: String,
    /// Caption under the button
    pub footer: String,
    /// Die and message colours
    pub colors: ValueColors,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            title: "RPG Dice Roller".to_string(),
            roll_label: "ROLL D20".to_string(),
            rolling_label: "ROLLING...".to_string(),
            footer: "20-sided die (d20)".to_string(),
            colors: ValueColors::default(),
        }
    }
}

/// Everything a presenter draws for one [`RollState`].
///
/// Platform-agnostic: GUI hosts map the fields onto widgets, terminal hosts
/// can use [`to_plain`](Self::to_plain) or [`to_ansi`](Self::to_ansi).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScreenView {
    pub title: String,
    /// Large die face text
    pub die_text: String,
    /// Colour shared by the die face and the message
    pub color: Rgb,
    pub message: String,
    /// Message drawn bold (face is 1 or 20)
    pub emphasized: bool,
    pub button_label: String,
    /// Trigger affordance; disabled while rolling
    pub button_enabled: bool,
    pub footer: String,
}

impl ScreenView {
    /// Colour as a CSS/hex string "#rrggbb".
    pub fn color_string(&self) -> String {
        to_hex(self.color)
    }

    /// One-line rendering without escape codes.
    pub fn to_plain(&self) -> String {
        let button = if self.button_enabled {
            format!("[ {} ]", self.button_label)
        } else {
            format!("( {} )", self.button_label)
        };
        format!("{:>2}  {}  {}", self.die_text, self.message, button)
    }

    /// One-line rendering with 24-bit ANSI colour and bold emphasis.
    pub fn to_ansi(&self) -> String {
        let (r, g, b) = self.color;
        let weight = if self.emphasized { "1;" } else { "" };
        let button = if self.button_enabled {
            format!("[ {} ]", self.button_label)
        } else {
            format!("\x1b[2m( {} )\x1b[0m", self.button_label)
        };
        format!(
            "\x1b[{weight}38;2;{r};{g};{b}m{:>2}  {}\x1b[0m  {}",
            self.die_text, self.message, button
        )
    }
}

/// Build the view for `state`.
///
/// ## Example
///
/// ```rust
/// use d20_core_view::{RenderConfig, RollState};
/// use d20_core_view::render::render_screen;
///
/// let view = render_screen(&RollState::default(), &RenderConfig::default());
/// assert_eq!(view.die_text, "1");
/// assert!(view.button_enabled);
/// assert_eq!(view.button_label, "ROLL D20");
/// ```
pub fn render_screen(state: &RollState, config: &RenderConfig) -> ScreenView {
    let face = state.current_value();
    let rolling = state.is_rolling();

    ScreenView {
        title: config.title.clone(),
        die_text: face.to_string(),
        color: config.colors.color_for(face, rolling),
        message: state.result_message().to_string(),
        emphasized: face.is_critical(),
        button_label: if rolling {
            config.rolling_label.clone()
        } else {
            config.roll_label.clone()
        },
        button_enabled: !rolling,
        footer: config.footer.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MessageSet, RollAnimation, ScriptedDice, Tick};

    fn settle(last: u8) -> RollAnimation {
        let mut anim = RollAnimation::default();
        let mut dice = ScriptedDice::ending_with(10, 15, last);
        anim.start();
        while let Tick::Frame(_) = anim.tick(&mut dice) {}
        anim
    }

    #[test]
    fn test_idle_view() {
        let view = render_screen(&RollState::new(&MessageSet::default()), &RenderConfig::default());
        assert_eq!(view.title, "RPG Dice Roller");
        assert_eq!(view.message, "Tap the button to roll");
        // Face 1 is a boundary face even before any roll.
        assert!(view.emphasized);
        assert_eq!(view.color, (0xDC, 0x14, 0x3C));
        assert_eq!(view.footer, "20-sided die (d20)");
    }

    #[test]
    fn test_rolling_view_disables_button() {
        let mut anim = RollAnimation::default();
        anim.start();
        let view = render_screen(anim.state(), &RenderConfig::default());
        assert!(!view.button_enabled);
        assert_eq!(view.button_label, "ROLLING...");
        assert_eq!(view.color, (0x66, 0x66, 0x66));
        assert_eq!(view.message, "Rolling...");
    }

    #[test]
    fn test_settled_views() {
        let config = RenderConfig::default();

        let hit = render_screen(settle(20).state(), &config);
        assert_eq!(hit.die_text, "20");
        assert_eq!(hit.color_string(), "#ffd700");
        assert!(hit.emphasized);
        assert!(hit.button_enabled);

        let plain = render_screen(settle(7).state(), &config);
        assert_eq!(plain.message, "Result: 7");
        assert!(!plain.emphasized);
        assert_eq!(plain.color_string(), "#333333");
    }

    #[test]
    fn test_text_renderings() {
        let view = render_screen(settle(7).state(), &RenderConfig::default());
        assert_eq!(view.to_plain(), " 7  Result: 7  [ ROLL D20 ]");

        let ansi = view.to_ansi();
        assert!(ansi.starts_with("\x1b[38;2;51;51;51m"));
        assert!(ansi.contains("Result: 7"));

        let crit = render_screen(settle(20).state(), &RenderConfig::default());
        assert!(crit.to_ansi().starts_with("\x1b[1;38;2;255;215;0m"));
    }
}
