use std::io;

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument, warn};

use crate::application::{ApplicationError, Navigator};
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, Settings};
use crate::domain::{Node, Tree, INITIAL_ID};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::traits::{SelectionItem, Selector};
use crate::infrastructure::InfraError;
use crate::util::path::expand_path;

/// Selection value for stepping back.
pub const BACK: &str = "__back";
/// Selection value for restarting the questionnaire.
pub const START_OVER: &str = "__start_over";

/// Snapshot of what the navigator currently presents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub prompt: String,
    pub options: Vec<Node>,
    pub outcome: Option<u32>,
    pub beyond_start: bool,
}

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let container = ServiceContainer::new(load_settings(cli)?);
    match &cli.command {
        Some(Commands::Walk) | None => {
            let mut nav = container.navigator();
            let selector = container.selector();
            walk(&mut nav, &selector, container.settings.show_outcome_ids).map(|_| ())
        }
        Some(Commands::Path { ids }) => {
            let mut nav = container.navigator();
            let position = follow_path(&mut nav, ids)?;
            print_position(&position, container.settings.show_outcome_ids);
            Ok(())
        }
        Some(Commands::Tree) => _tree(&container),
        Some(Commands::Outcomes) => _outcomes(&container),
        Some(Commands::Config { command }) => _config(&container, command),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
    }
}

/// Settings from config layers, with `--tree-file` on top.
pub fn load_settings(cli: &Cli) -> CliResult<Settings> {
    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(path) = &cli.tree_file {
        settings.tree_file = Some(expand_path(path));
    }
    debug!("settings: {:?}", settings);
    Ok(settings)
}

/// Fail when the navigator's tree could not be loaded.
pub fn ensure_tree(nav: &Navigator) -> CliResult<()> {
    match nav.tree() {
        Ok(_) => Ok(()),
        Err(e) => Err(ApplicationError::from(e.clone()).into()),
    }
}

pub fn position(nav: &Navigator) -> CliResult<Position> {
    ensure_tree(nav)?;
    Ok(Position {
        prompt: nav.prompt_text().latest().unwrap_or_default(),
        options: nav.options().latest().unwrap_or_default(),
        outcome: nav.outcome(),
        beyond_start: nav.is_beyond_start().latest().unwrap_or(false),
    })
}

/// Select `ids` in order and report where they lead.
#[instrument(skip(nav))]
pub fn follow_path(nav: &mut Navigator, ids: &[String]) -> CliResult<Position> {
    if ids.iter().any(|id| id.trim().is_empty()) {
        return Err(CliError::InvalidArgs("node ids must not be empty".into()));
    }
    ensure_tree(nav)?;
    for id in ids {
        nav.select_option(id);
    }
    position(nav)
}

/// Display text for an offered node.
pub fn option_text(node: &Node) -> String {
    match (&node.label, node.outcome_id) {
        (Some(label), _) => label.clone(),
        (None, Some(outcome)) => format!("→ outcome {outcome}"),
        (None, None) => node.id.clone(),
    }
}

/// Offered options plus navigation controls once past the start.
///
/// Display strings carry the node id: selectors resolve picks by display text
/// and sibling nodes may share a label.
pub fn selection_items(position: &Position) -> Vec<SelectionItem> {
    let mut items: Vec<SelectionItem> = position
        .options
        .iter()
        .map(|node| SelectionItem {
            display: format!("[{}] {}", node.id, option_text(node)),
            value: node.id.clone(),
        })
        .collect();
    if position.beyond_start {
        items.push(SelectionItem {
            display: "← Back".to_string(),
            value: BACK.to_string(),
        });
        items.push(SelectionItem {
            display: "↺ Start over".to_string(),
            value: START_OVER.to_string(),
        });
    }
    items
}

/// Interactive loop; returns the outcome reached when the user quits.
pub fn walk(
    nav: &mut Navigator,
    selector: &dyn Selector,
    show_outcome_ids: bool,
) -> CliResult<Option<u32>> {
    ensure_tree(nav)?;
    let subscription = nav
        .prompt_text()
        .subscribe(|text: &String| output::prompt_text(text));

    let result = loop {
        let current = position(nav)?;
        if let Some(outcome) = current.outcome {
            print_outcome(outcome, show_outcome_ids);
        }

        let items = selection_items(&current);
        let picked = match selector.select_one(&items, "> ") {
            Ok(picked) => picked,
            Err(message) => break Err(CliError::from(InfraError::selector(message))),
        };
        let Some(item) = picked else {
            debug!("walk: user quit at {}", nav.state().current_id());
            break Ok(nav.outcome());
        };

        match item.value.as_str() {
            BACK => nav.back(),
            START_OVER => nav.start_over(),
            id => nav.select_option(id),
        }
    };

    nav.prompt_text().unsubscribe(subscription);
    result
}

fn print_outcome(outcome: u32, show_outcome_ids: bool) {
    if show_outcome_ids {
        output::outcome(&format!("outcome {outcome}"));
    } else {
        output::outcome("final answer reached");
    }
}

fn print_position(position: &Position, show_outcome_ids: bool) {
    output::prompt_text(&position.prompt);
    for node in &position.options {
        output::option(&node.id, &option_text(node));
    }
    match position.outcome {
        Some(outcome) => print_outcome(outcome, show_outcome_ids),
        None if position.options.is_empty() => {
            output::warning("no options here; use start over")
        }
        None => {}
    }
}

/// Render the questionnaire from `initial` downwards.
///
/// A node already on the current branch is shown once more and not expanded.
pub fn tree_view(tree: &Tree) -> termtree::Tree<String> {
    fn build(tree: &Tree, key: &str, ancestors: &mut Vec<String>) -> termtree::Tree<String> {
        let text = match tree.get(key) {
            Some(node) if key == INITIAL_ID => node.id.clone(),
            Some(node) => format!("[{key}] {}", option_text(node)),
            None => format!("[{key}] <missing>"),
        };
        if ancestors.iter().any(|a| a == key) {
            return termtree::Tree::new(format!("{text} (cycle)"));
        }
        ancestors.push(key.to_string());
        let leaves: Vec<termtree::Tree<String>> = tree
            .get(key)
            .map(|node| node.options.clone())
            .unwrap_or_default()
            .iter()
            .map(|child| build(tree, child, ancestors))
            .collect();
        ancestors.pop();
        termtree::Tree::new(text).with_leaves(leaves)
    }

    build(tree, INITIAL_ID, &mut Vec::new())
}

#[instrument(skip(container))]
fn _tree(container: &ServiceContainer) -> CliResult<()> {
    let tree = container.provider.load_tree()?;
    output::info(&tree_view(&tree));
    Ok(())
}

#[instrument(skip(container))]
fn _outcomes(container: &ServiceContainer) -> CliResult<()> {
    let tree = container.provider.load_tree()?;
    let outcomes = tree.terminal_outcomes();
    if outcomes.is_empty() {
        warn!("tree from {} has no outcomes", container.provider.describe());
    }
    for outcome in outcomes {
        output::info(&outcome);
    }
    Ok(())
}

fn _config(container: &ServiceContainer, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => output::info(&container.settings.to_toml()?),
        ConfigCommands::Template => output::info(&Settings::template()),
        ConfigCommands::Path => match global_config_path() {
            Some(path) => output::info(&path.display()),
            None => output::warning("no config directory on this platform"),
        },
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::voters_decision_tree;
    use itertools::Itertools;

    #[test]
    fn given_nodes_when_rendering_option_text_then_label_outcome_or_id() {
        let tree = voters_decision_tree().unwrap();
        assert_eq!(option_text(tree.get("0").unwrap()), "Ești cetățean român");
        assert_eq!(option_text(tree.get("000").unwrap()), "→ outcome 1");
        assert_eq!(option_text(tree.get(INITIAL_ID).unwrap()), INITIAL_ID);
    }

    #[test]
    fn given_shipped_tree_when_rendering_then_all_branches_shown() {
        let tree = voters_decision_tree().unwrap();
        let rendered = tree_view(&tree).to_string();
        assert!(rendered.starts_with(INITIAL_ID));
        assert!(rendered.contains("[011110] → outcome 5"));
        // key 1010 appears under both 100 and 101
        assert_eq!(rendered.matches("[1010] → outcome 7").count(), 2);
        assert!(!rendered.contains("outcome 6"));
    }

    #[test]
    fn given_initial_position_when_building_items_then_no_controls() {
        let position = Position {
            prompt: String::new(),
            options: vec![Node::outcome("x", 1)],
            outcome: None,
            beyond_start: false,
        };
        let items = selection_items(&position);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].value, "x");
        assert_eq!(items[0].display, "[x] → outcome 1");
    }

    #[test]
    fn given_siblings_sharing_label_when_building_items_then_displays_distinct() {
        let tree = voters_decision_tree().unwrap();
        let (first, second) = (tree.get("100").unwrap(), tree.get("101").unwrap());
        assert_eq!(first.label, second.label);

        let position = Position {
            prompt: String::new(),
            options: vec![first.clone(), second.clone()],
            outcome: None,
            beyond_start: true,
        };
        let items = selection_items(&position);

        assert_ne!(items[0].display, items[1].display);
        assert!(items.iter().map(|i| &i.display).all_unique());
    }
}
