//! Tests for the CLI walk loop and path command using a scripted selector

use std::cell::RefCell;
use std::collections::VecDeque;
use std::sync::Arc;

use rstest::rstest;

use votenav::application::{Navigator, INTRO_PROMPT};
use votenav::cli::commands::{
    follow_path, position, selection_items, walk, BACK, START_OVER,
};
use votenav::cli::CliError;
use votenav::exitcode;
use votenav::infrastructure::providers::{FailingTreeProvider, StaticTreeProvider};
use votenav::infrastructure::traits::{item_for_display, SelectionItem, Selector};

/// Mock selector that picks values from a script, then cancels.
struct ScriptedSelector {
    script: RefCell<VecDeque<&'static str>>,
    offered: RefCell<Vec<Vec<String>>>,
}

impl ScriptedSelector {
    fn new(script: &[&'static str]) -> Self {
        Self {
            script: RefCell::new(script.iter().copied().collect()),
            offered: RefCell::new(Vec::new()),
        }
    }
}

impl Selector for ScriptedSelector {
    fn select_one(
        &self,
        items: &[SelectionItem],
        _prompt: &str,
    ) -> Result<Option<SelectionItem>, String> {
        self.offered
            .borrow_mut()
            .push(items.iter().map(|i| i.value.clone()).collect());
        match self.script.borrow_mut().pop_front() {
            Some(value) => items
                .iter()
                .find(|i| i.value == value)
                .cloned()
                .map(Some)
                .ok_or_else(|| format!("{value} not offered")),
            None => Ok(None), // User cancelled
        }
    }
}

/// Picks by value like `ScriptedSelector`, but hands back only the display
/// line the way skim does.
struct DisplayOnlySelector(ScriptedSelector);

impl Selector for DisplayOnlySelector {
    fn select_one(
        &self,
        items: &[SelectionItem],
        prompt: &str,
    ) -> Result<Option<SelectionItem>, String> {
        Ok(self
            .0
            .select_one(items, prompt)?
            .and_then(|picked| item_for_display(items, &picked.display)))
    }
}

fn navigator() -> Navigator {
    Navigator::new(Arc::new(StaticTreeProvider))
}

#[rstest]
#[case(&["0", "00", "000"], Some(1))]
#[case(&["0", "01", "010", "0100"], Some(2))]
#[case(&["0", "01", "011", "0110", "01100"], Some(3))]
#[case(&["0", "01", "011", "0111", "01111", "011110"], Some(5))]
// the option under key "1010" is offered with id "1000", which selects outcome 6
#[case(&["1", "10", "100", "1000"], Some(6))]
#[case(&["1", "11", "110"], Some(8))]
#[case(&["1", "11"], None)]
fn given_script_when_walking_then_reaches_outcome(
    #[case] script: &[&'static str],
    #[case] expected: Option<u32>,
) {
    let mut nav = navigator();
    let selector = ScriptedSelector::new(script);

    let outcome = walk(&mut nav, &selector, true).unwrap();

    assert_eq!(outcome, expected);
}

#[test]
fn given_back_and_start_over_when_walking_then_controls_applied() {
    let mut nav = navigator();
    let selector = ScriptedSelector::new(&["1", BACK, "0", "00", START_OVER, "1", "11", "110"]);

    let outcome = walk(&mut nav, &selector, false).unwrap();

    assert_eq!(outcome, Some(8));
    let offered = selector.offered.borrow();
    // no controls at the start
    assert_eq!(offered[0], vec!["0", "1"]);
    // controls once past the start
    assert_eq!(offered[1], vec!["10", "11", BACK, START_OVER]);
}

#[test]
fn given_key_id_mismatch_when_offering_then_value_is_node_id() {
    let mut nav = navigator();
    let selector = ScriptedSelector::new(&["1", "10", "101"]);

    walk(&mut nav, &selector, true).unwrap();

    let offered = selector.offered.borrow();
    assert_eq!(offered.last().unwrap(), &vec!["1000", BACK, START_OVER]);
}

#[test]
fn given_terminal_node_when_walking_then_only_controls_offered() {
    let mut nav = navigator();
    let selector = ScriptedSelector::new(&["1", "11", "110"]);

    walk(&mut nav, &selector, true).unwrap();

    let offered = selector.offered.borrow();
    assert_eq!(offered.last().unwrap(), &vec![BACK, START_OVER]);
}

#[test]
fn given_selector_error_when_walking_then_selector_error_returned() {
    let mut nav = navigator();
    let selector = ScriptedSelector::new(&["not-offered"]);

    let err = walk(&mut nav, &selector, true).unwrap_err();

    assert!(err.to_string().contains("not-offered not offered"));
    assert_eq!(err.exit_code(), exitcode::SOFTWARE);
    assert_eq!(nav.prompt_text().subscriber_count(), 0);
}

#[test]
fn given_failing_tree_when_walking_then_unavailable() {
    let mut nav = Navigator::new(Arc::new(FailingTreeProvider::new("no network")));
    let selector = ScriptedSelector::new(&["0"]);

    let err = walk(&mut nav, &selector, true).unwrap_err();

    assert!(matches!(err, CliError::Infra(_)));
    assert_eq!(err.exit_code(), exitcode::UNAVAILABLE);
    assert!(selector.offered.borrow().is_empty());
}

#[test]
fn given_ids_when_following_path_then_reports_position() {
    let mut nav = navigator();
    let ids: Vec<String> = ["0", "01"].iter().map(|s| s.to_string()).collect();

    let pos = follow_path(&mut nav, &ids).unwrap();

    assert_eq!(
        pos.prompt,
        "Ești cetățean român Te vei afla în Romania pe 27 septembrie..."
    );
    let option_ids: Vec<&str> = pos.options.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(option_ids, vec!["010", "011"]);
    assert_eq!(pos.outcome, None);
    assert!(pos.beyond_start);
    assert_eq!(selection_items(&pos).len(), 4);
}

#[test]
fn given_fresh_navigator_when_reading_position_then_intro() {
    let nav = navigator();
    let pos = position(&nav).unwrap();
    assert_eq!(pos.prompt, INTRO_PROMPT);
    assert!(!pos.beyond_start);
}

#[test]
fn given_blank_id_when_following_path_then_usage_error() {
    let mut nav = navigator();
    let ids = vec!["0".to_string(), " ".to_string()];

    let err = follow_path(&mut nav, &ids).unwrap_err();

    assert!(matches!(err, CliError::InvalidArgs(_)));
    assert_eq!(err.exit_code(), exitcode::USAGE);
    assert!(nav.state().is_initial());
}

#[rstest]
#[case(&["1", "10", "100"])]
#[case(&["1", "10", "101"])]
fn given_siblings_sharing_label_when_picking_by_display_then_chosen_node_selected(
    #[case] script: &[&'static str],
) {
    let mut nav = navigator();
    let selector = DisplayOnlySelector(ScriptedSelector::new(script));

    walk(&mut nav, &selector, true).unwrap();

    let expected: Vec<String> = std::iter::once("initial")
        .chain(script.iter().copied())
        .map(String::from)
        .collect();
    assert_eq!(nav.state().path(), expected.as_slice());
}
