pub mod colors;

pub use colors::Color;

use cpustat_config::ThemeConfig;
use cpustat_core::CategoryMode;

/// Compiled theme derived from [`ThemeConfig`] for one [`CategoryMode`].
///
/// Colors are resolved per category in stacking order.  Calling
/// [`Theme::from_config`] is infallible: invalid color strings fall back to
/// the category's default color.
#[derive(Debug, Clone)]
pub struct Theme {
    /// One color per category of the mode, bottom of the bar first.
    pub palette: Vec<Color>,
    /// Chart title, including the color legend unless overridden.
    pub title:   String,
    pub border:  bool,
}

impl Theme {
    /// Build a [`Theme`] from the config file's `[theme]` section.
    pub fn from_config(cfg: &ThemeConfig, mode: CategoryMode) -> Self {
        let palette: Vec<Color> = mode
            .categories()
            .iter()
            .map(|category| {
                let fallback = Color::from_name(category.default_color()).unwrap_or(Color::White);
                match cfg.colors.get(category.key()) {
                    Some(raw) => Color::parse(raw).unwrap_or_else(|| {
                        tracing::warn!(
                            "Invalid color '{raw}' for '{}'; using {}.",
                            category.key(),
                            fallback.legend_name()
                        );
                        fallback
                    }),
                    None => fallback,
                }
            })
            .collect();

        let title = cfg
            .title
            .clone()
            .unwrap_or_else(|| legend_title(mode, &palette));

        Self {
            palette,
            title,
            border: cfg.border,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_config(&ThemeConfig::default(), CategoryMode::default())
    }
}

/// `CPU Usage (GREEN:Work, RED:Steal, BLUE:Idle)`
fn legend_title(mode: CategoryMode, palette: &[Color]) -> String {
    let legend: Vec<String> = mode
        .categories()
        .iter()
        .zip(palette)
        .map(|(category, color)| format!("{}:{}", color.legend_name(), category.label()))
        .collect();
    format!("CPU Usage ({})", legend.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compact_title_matches_legend() {
        let theme = Theme::default();
        assert_eq!(theme.title, "CPU Usage (GREEN:Work, RED:Steal, BLUE:Idle)");
        assert_eq!(theme.palette, vec![Color::Green, Color::Red, Color::Blue]);
    }

    #[test]
    fn detailed_title_matches_legend() {
        let theme = Theme::from_config(&ThemeConfig::default(), CategoryMode::Detailed);
        assert_eq!(
            theme.title,
            "CPU Usage (GREEN:User, CYAN:Nice, YELLOW:System, BLUE:Idle, \
             WHITE:IOwait, MAGENTA:IRQ, RED:Steal)"
        );
        assert_eq!(theme.palette.len(), CategoryMode::Detailed.len());
    }

    #[test]
    fn overrides_apply_and_invalid_falls_back() {
        let mut cfg = ThemeConfig::default();
        cfg.colors.insert("idle".into(), "#303030".into());
        cfg.colors.insert("work".into(), "not-a-color".into());

        let theme = Theme::from_config(&cfg, CategoryMode::Compact);
        assert_eq!(theme.palette, vec![Color::Green, Color::Red, Color::Rgb(0x30, 0x30, 0x30)]);
        assert!(theme.title.ends_with("#303030:Idle)"));
    }

    #[test]
    fn explicit_title_wins() {
        let cfg = ThemeConfig {
            title: Some("load".into()),
            ..ThemeConfig::default()
        };
        assert_eq!(Theme::from_config(&cfg, CategoryMode::Compact).title, "load");
    }
}
