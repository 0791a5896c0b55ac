#[allow(dead_code)]
mod common;

use color_eyre::Result;
use common::harness::enter;
use dropsel::prelude::Focusable;

const CHOICES: &[&str] = &["Alpha\ta", "Beta\tb"];

#[test]
fn pick_by_filtering() -> Result<()> {
    let mut h = enter(CHOICES, &[])?;
    assert!(!h.focused());
    assert_eq!(h.field(), "");

    h.click_field()?;
    assert!(h.focused());
    assert_eq!(h.rows(), vec!["Alpha", "Beta"]);

    h.type_str("be")?;
    assert_eq!(h.field(), "be");
    assert_eq!(h.rows(), vec!["Beta"]);

    h.press_row(0)?;
    assert_eq!(h.value(), Some("b"));
    assert!(!h.focused());
    assert_eq!(h.field(), "Beta");
    assert!(h.rows().is_empty());
    Ok(())
}

#[test]
fn filter_matches_value_too() -> Result<()> {
    let mut h = enter(&["Alpha\tfirst", "Beta\tsecond"], &[])?;
    h.click_field()?;
    h.type_str("SEC")?;
    assert_eq!(h.rows(), vec!["Beta"]);
    Ok(())
}

#[test]
fn no_match_shows_no_rows() -> Result<()> {
    let mut h = enter(CHOICES, &[])?;
    h.click_field()?;
    h.type_str("zzz")?;
    assert!(h.rows().is_empty());
    assert_eq!(h.line(3), "");

    h.click(10, 6)?;
    assert!(!h.focused());
    assert_eq!(h.value(), None);
    assert_eq!(h.field(), "");
    Ok(())
}

#[test]
fn refocus_resets_the_filter() -> Result<()> {
    let mut h = enter(CHOICES, &["--value", "a"])?;
    assert_eq!(h.field(), "Alpha");

    h.click_field()?;
    assert_eq!(h.field(), "");
    h.type_str("x")?;
    h.click(10, 7)?;
    assert_eq!(h.field(), "Alpha");

    h.click_field()?;
    assert_eq!(h.field(), "");
    assert_eq!(h.rows(), vec!["Alpha", "Beta"]);
    Ok(())
}

#[test]
fn disabled_widget_cannot_be_focused() -> Result<()> {
    let mut h = enter(CHOICES, &["--disabled", "--value", "a"])?;
    h.click_field()?;
    assert!(!h.focused());
    h.click_open()?;
    assert!(!h.focused());
    h.type_str("be")?;
    assert_eq!(h.field(), "Alpha");
    assert_eq!(h.dropsel.app().select.filter(), "");
    Ok(())
}

#[test]
fn clear_while_blurred() -> Result<()> {
    let mut h = enter(CHOICES, &["--value", "b"])?;
    assert_eq!(h.field(), "Beta");
    h.click_clear()?;
    assert_eq!(h.value(), None);
    assert_eq!(h.field(), "");
    assert!(!h.focused());
    Ok(())
}

#[test]
fn clear_while_focused_blurs_then_clears() -> Result<()> {
    let mut h = enter(CHOICES, &["--value", "b"])?;
    h.click_field()?;
    h.type_str("al")?;
    h.click_clear()?;
    assert!(!h.focused());
    assert_eq!(h.value(), None);
    assert_eq!(h.dropsel.app().select.filter(), "");
    Ok(())
}

#[test]
fn open_button_focuses() -> Result<()> {
    let mut h = enter(CHOICES, &[])?;
    h.click_open()?;
    assert!(h.focused());
    assert!(h.dropsel.app().field.is_focused());
    assert_eq!(h.rows(), vec!["Alpha", "Beta"]);
    Ok(())
}

#[test]
fn button_press_released_elsewhere_is_not_a_click() -> Result<()> {
    let mut h = enter(CHOICES, &["--value", "a"])?;
    let clear = h.dropsel.app().clear_button.area();
    h.press(clear.x + 1, clear.y)?;
    assert!(h.dropsel.app().clear_button.is_pressed());
    h.release(0, 7)?;
    assert!(!h.dropsel.app().clear_button.is_pressed());
    assert_eq!(h.value(), Some("a"));
    Ok(())
}

#[test]
fn disabled_row_is_still_selectable() -> Result<()> {
    let mut h = enter(&["Alpha\ta", "Beta\tb\tdisabled"], &[])?;
    h.click_field()?;
    h.press_row(1)?;
    assert_eq!(h.value(), Some("b"));
    Ok(())
}

#[test]
fn row_commit_survives_the_blur() -> Result<()> {
    let mut h = enter(CHOICES, &["--value", "a"])?;
    h.click_field()?;
    h.press_row(1)?;
    // the list is gone after the press, the release lands on nothing
    h.release(3, 4)?;
    assert_eq!(h.value(), Some("b"));
    assert_eq!(h.field(), "Beta");
    Ok(())
}

#[test]
fn rows_past_the_screen_cannot_be_hit() -> Result<()> {
    let choices: Vec<String> = (1..=10).map(|i| format!("Item {i}\t{i}")).collect();
    let choices: Vec<&str> = choices.iter().map(String::as_str).collect();
    let mut h = enter(&choices, &[])?;
    h.click_field()?;
    assert_eq!(h.rows().len(), 10);
    assert_eq!(h.dropsel.app().option_list.displayed(), 5);
    h.press_row(4)?;
    assert_eq!(h.value(), Some("5"));
    Ok(())
}

#[test]
fn no_mouse_ignores_clicks() -> Result<()> {
    let mut h = enter(CHOICES, &["--no-mouse", "--value", "a"])?;
    h.click_field()?;
    assert!(!h.focused());
    h.click_clear()?;
    assert_eq!(h.value(), Some("a"));
    Ok(())
}
