//! Handle the color theme
use std::sync::LazyLock;

use ratatui::style::{Color, Modifier, Style};

use crate::options::SelectOptions;

/// Theme defaults to Dark256
pub static DEFAULT_THEME: LazyLock<ColorTheme> = LazyLock::new(ColorTheme::dark256);

/// The color scheme of the dropdown
///
/// Each style stands for one of the widget's class names; modifiers are patched over the base
/// style they modify.
///
/// <pre>
/// ┌─────────────────────┐
/// │ Alp|         ✕  >  │  --> field / placeholder, button / button_clear
/// └─────────────── 1/2 ┘  --> border (patched by focused), info
///   Alpha                 --> option
///   Alphabet              --> option + option_selected
/// </pre>
#[derive(Copy, Clone, Debug, Default)]
pub struct ColorTheme {
    /// Root container (`Select`)
    pub normal: Style,
    /// Root while focused (`Select_focus`)
    pub focused: Style,
    /// Root while disabled (`Select_disabled`)
    pub disabled: Style,
    /// The caller's extra class on the root
    pub class: Style,
    /// Text of the field (`SelectValue`)
    pub field: Style,
    /// Placeholder shown in the empty field
    pub placeholder: Style,
    /// Border around the field
    pub border: Style,
    /// Both buttons (`SelectAction`)
    pub button: Style,
    /// The clear button (`SelectActionClear`)
    pub button_clear: Style,
    /// A button while the pointer is held on it
    pub button_pressed: Style,
    /// Option rows (`SelectOption`)
    pub option: Style,
    /// Disabled rows (`SelectOption_disabled`)
    pub option_disabled: Style,
    /// The row of the current value (`SelectOption_selected`)
    pub option_selected: Style,
    /// Match count in the border
    pub info: Style,
}

impl ColorTheme {
    /// Setup the theme from the options
    pub fn init_from_options(options: &SelectOptions) -> ColorTheme {
        if let Some(color) = options.color.clone() {
            ColorTheme::from_options(&color)
        } else {
            // Check for NO_COLOR environment variable
            match std::env::var_os("NO_COLOR") {
                Some(no_color) if !no_color.is_empty() => ColorTheme::none(),
                _ => ColorTheme::dark256(),
            }
        }
    }

    fn none() -> Self {
        Self {
            placeholder: Style::default().dim(),
            disabled: Style::default().dim(),
            option_disabled: Style::default().dim().crossed_out(),
            option_selected: Style::default().bold(),
            button_pressed: Style::default().reversed(),
            ..ColorTheme::default()
        }
    }

    fn bw() -> Self {
        let base = ColorTheme::none();
        ColorTheme {
            focused: base.focused.bold(),
            field: base.field.underlined(),
            option_selected: base.option_selected.reversed(),
            ..base
        }
    }

    fn default16() -> Self {
        let base = ColorTheme::none();
        ColorTheme {
            focused: base.focused.fg(Color::Blue),
            field: base.field.fg(Color::White),
            placeholder: base.placeholder.fg(Color::DarkGray),
            border: base.border.fg(Color::Black),
            button: base.button.fg(Color::Cyan),
            button_clear: base.button_clear.fg(Color::Red),
            option_disabled: base.option_disabled.fg(Color::DarkGray),
            option_selected: base.option_selected.fg(Color::Green),
            info: base.info.fg(Color::White),
            ..base
        }
    }

    fn dark256() -> Self {
        let base = ColorTheme::none();
        ColorTheme {
            focused: base.focused.fg(Color::Indexed(110)),
            placeholder: base.placeholder.fg(Color::Indexed(243)),
            border: base.border.fg(Color::Indexed(59)),
            button: base.button.fg(Color::Indexed(109)),
            button_clear: base.button_clear.fg(Color::Indexed(161)),
            option_disabled: base.option_disabled.fg(Color::Indexed(240)),
            option_selected: base.option_selected.fg(Color::Indexed(108)).bg(Color::Indexed(236)),
            info: base.info.fg(Color::Indexed(144)),
            ..base
        }
    }

    fn molokai256() -> Self {
        let base = ColorTheme::none();
        ColorTheme {
            focused: base.focused.fg(Color::Indexed(148)),
            placeholder: base.placeholder.fg(Color::Indexed(243)),
            border: base.border.fg(Color::Indexed(59)),
            button: base.button.fg(Color::Indexed(81)),
            button_clear: base.button_clear.fg(Color::Indexed(197)),
            option_disabled: base.option_disabled.fg(Color::Indexed(240)),
            option_selected: base.option_selected.fg(Color::Indexed(234)).bg(Color::Indexed(186)),
            info: base.info.fg(Color::Indexed(144)),
            ..base
        }
    }

    fn light256() -> Self {
        let base = ColorTheme::none();
        ColorTheme {
            focused: base.focused.fg(Color::Indexed(25)),
            placeholder: base.placeholder.fg(Color::Indexed(246)),
            border: base.border.fg(Color::Indexed(145)),
            button: base.button.fg(Color::Indexed(31)),
            button_clear: base.button_clear.fg(Color::Indexed(161)),
            option_disabled: base.option_disabled.fg(Color::Indexed(250)),
            option_selected: base.option_selected.fg(Color::Indexed(66)).bg(Color::Indexed(251)),
            info: base.info.fg(Color::Indexed(101)),
            ..base
        }
    }

    fn set_color(&mut self, name: &str, spec: &str) {
        let (new_color, modifier) = parse_spec(spec);

        // Apply - check for layer suffixes (_fg, -fg, _bg, -bg, _u, -u, etc.)
        let (component_name, layer) = if name.ends_with("_fg") || name.ends_with("-fg") {
            (&name[..name.len() - 3], "fg")
        } else if name.ends_with("_bg") || name.ends_with("-bg") {
            (&name[..name.len() - 3], "bg")
        } else if name.ends_with("_u") || name.ends_with("-u") {
            (&name[..name.len() - 2], "u")
        } else if name.ends_with("_underline") || name.ends_with("-underline") {
            (&name[..name.len() - 10], "underline")
        } else if name == "bg" {
            ("", "bg")
        } else {
            (name, "fg")
        };

        let style = match component_name {
            "" | "normal" | "select" => &mut self.normal,
            "focused" | "focus" => &mut self.focused,
            "disabled" => &mut self.disabled,
            "class" => &mut self.class,
            "field" | "value" | "query" => &mut self.field,
            "placeholder" => &mut self.placeholder,
            "border" => &mut self.border,
            "button" | "action" => &mut self.button,
            "clear" | "button_clear" => &mut self.button_clear,
            "pressed" | "button_pressed" => &mut self.button_pressed,
            "option" => &mut self.option,
            "option_disabled" | "disabled+" => &mut self.option_disabled,
            "option_selected" | "selected" | "marker" => &mut self.option_selected,
            "info" => &mut self.info,
            c => {
                debug!("Unknown color component '{c}'");
                return;
            }
        };
        set_style(style, layer, new_color, modifier);
    }

    fn from_options(color: &str) -> Self {
        let mut theme = ColorTheme::dark256();
        for pair in color.split(',') {
            if let Some((name, spec)) = pair.split_once(':') {
                theme.set_color(name, spec);
            } else {
                theme = match pair {
                    "molokai" => ColorTheme::molokai256(),
                    "light" => ColorTheme::light256(),
                    "16" => ColorTheme::default16(),
                    "bw" => ColorTheme::bw(),
                    "none" | "empty" => ColorTheme::none(),
                    "dark" | "default" => ColorTheme::dark256(),
                    t => {
                        debug!("Unknown color theme '{t}'");
                        ColorTheme::dark256()
                    }
                };
            }
        }
        theme
    }

    /// Style of the root container for the given state
    pub fn root_style(&self, classes: crate::classes::RootClasses, has_class: bool) -> Style {
        let mut style = self.normal;
        if has_class {
            style = style.patch(self.class);
        }
        if classes.disabled {
            style = style.patch(self.disabled);
        }
        if classes.focused {
            style = style.patch(self.focused);
        }
        style
    }

    /// Style of an option row for the given state
    pub fn row_style(&self, classes: crate::classes::RowClasses) -> Style {
        let mut style = self.option;
        if classes.disabled {
            style = style.patch(self.option_disabled);
        }
        if classes.selected {
            style = style.patch(self.option_selected);
        }
        style
    }
}

/// Parses `color[:modifier...]` where color is `#rrggbb` or a 0-255 index
fn parse_spec(spec: &str) -> (Option<Color>, Modifier) {
    let spec_parts: Vec<_> = spec.split(['+', ':']).collect();

    let raw_color = spec_parts[0];
    let color = if raw_color.len() == 7 && raw_color.starts_with('#') {
        // RGB Hex color
        let r = u8::from_str_radix(&raw_color[1..3], 16).unwrap_or(255);
        let g = u8::from_str_radix(&raw_color[3..5], 16).unwrap_or(255);
        let b = u8::from_str_radix(&raw_color[5..7], 16).unwrap_or(255);
        Some(Color::Rgb(r, g, b))
    } else {
        raw_color.parse::<u8>().ok().map(Color::Indexed).or_else(|| {
            debug!("Unknown color '{raw_color}'");
            None
        })
    };

    let mut modifier = Modifier::empty();
    for part in spec_parts.iter().skip(1) {
        if matches!(*part, "x" | "regular") {
            modifier = Modifier::empty()
        } else {
            modifier |= match *part {
                "b" | "bold" => Modifier::BOLD,
                "u" | "underlined" => Modifier::UNDERLINED,
                "c" | "crossed-out" => Modifier::CROSSED_OUT,
                "d" | "dim" => Modifier::DIM,
                "i" | "italic" => Modifier::ITALIC,
                "r" | "reverse" => Modifier::REVERSED,
                m => {
                    debug!("Unknown modifier '{m}'");
                    Modifier::empty()
                }
            };
        }
    }
    (color, modifier)
}

fn set_style(s: &mut Style, layer: &str, color: Option<Color>, modifier: Modifier) {
    if let Some(c) = color {
        *s = match layer {
            "fg" => s.fg(c),
            "bg" => s.bg(c),
            "u" | "underline" => s.underline_color(c),
            _ => *s,
        }
    }
    *s = s.add_modifier(modifier);
}
