//! The shipped voting-eligibility questionnaire.
//!
//! Branches on citizenship, presence in the country on election day, the
//! address on the ID card, the residence visa sticker, whether someone can
//! register you at their address, immigration-registry status and address
//! changes. Eight terminal outcomes, numbered 1 to 8.
//!
//! Key `1010` holds a node whose `id` is `1000` (outcome 7), while the node
//! under key `1000` (outcome 6) is unreachable. This is kept as shipped.

use crate::domain::entities::{Node, Tree, INITIAL_ID};
use crate::domain::error::DomainError;

/// Build the hardcoded questionnaire.
pub fn voters_decision_tree() -> Result<Tree, DomainError> {
    let initial = Node {
        id: INITIAL_ID.to_string(),
        label: None,
        options: vec!["0".to_string(), "1".to_string()],
        outcome_id: None,
    };

    let entries = vec![
        (INITIAL_ID, initial),
        ("0", Node::question("0", "Ești cetățean român", &["00", "01"])),
        (
            "1",
            Node::question(
                "1",
                "Ești cetățean al unei alte țări din Uniunea Europeană",
                &["10", "11"],
            ),
        ),
        (
            "00",
            Node::question("00", "Nu te vei afla în România pe 27 septembrie", &["000"]),
        ),
        (
            "01",
            Node::question("01", "Te vei afla în Romania pe 27 septembrie", &["010", "011"]),
        ),
        ("000", Node::outcome("000", 1)),
        (
            "010",
            Node::question("010", "Locuiești la adresa din buletin", &["0100"]),
        ),
        ("0100", Node::outcome("0100", 2)),
        (
            "011",
            Node::question(
                "011",
                "Locuiești la altă adresă decât cea din buletin",
                &["0110", "0111"],
            ),
        ),
        (
            "0110",
            Node::question(
                "0110",
                "Ai pe spatele buletinului un autocolant cu viza de flotant",
                &["01100"],
            ),
        ),
        ("01100", Node::outcome("01100", 3)),
        (
            "0111",
            Node::question(
                "0111",
                "Nu ai viză de flotant pe spatele buletinului",
                &["01110", "01111"],
            ),
        ),
        (
            "01110",
            Node::question("01110", "Te poate lua cineva în spațiu", &["011100"]),
        ),
        ("011100", Node::outcome("011100", 4)),
        (
            "01111",
            Node::question(
                "01111",
                "Nu ai pe cineva care te poate lua în spațiu",
                &["011110"],
            ),
        ),
        ("011110", Node::outcome("011110", 5)),
        (
            "10",
            Node::question(
                "10",
                "Ești în evidența Inspectoratului General pentru Imigrări",
                &["100", "101"],
            ),
        ),
        (
            "100",
            Node::question(
                "100",
                "Adresa la care locuiești nu se va schimba în intervalul 3-27 septembrie",
                &["1010"],
            ),
        ),
        ("1000", Node::outcome("1000", 6)),
        (
            "101",
            Node::question(
                "101",
                "Adresa la care locuiești nu se va schimba în intervalul 3-27 septembrie",
                &["1010"],
            ),
        ),
        ("1010", Node::outcome("1000", 7)),
        (
            "11",
            Node::question(
                "11",
                "Nu ești în evidența Inspectoratului General pentru Imigrări",
                &["110"],
            ),
        ),
        ("110", Node::outcome("110", 8)),
    ];

    Tree::from_entries(
        entries
            .into_iter()
            .map(|(key, node)| (key.to_string(), node)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_shipped_data_when_building_then_tree_is_valid() {
        let tree = voters_decision_tree().expect("shipped tree is valid");
        assert_eq!(tree.len(), 23);
        assert_eq!(tree.initial().options, vec!["0", "1"]);
    }

    #[test]
    fn given_shipped_data_when_listing_outcomes_then_has_eight() {
        let tree = voters_decision_tree().unwrap();
        assert_eq!(tree.terminal_outcomes(), (1..=8).collect::<Vec<_>>());
    }

    #[test]
    fn given_key_1010_when_looking_up_then_node_id_is_1000() {
        let tree = voters_decision_tree().unwrap();
        let node = tree.get("1010").unwrap();
        assert_eq!(node.id, "1000");
        assert_eq!(node.outcome_id, Some(7));
        assert_eq!(tree.get("1000").unwrap().outcome_id, Some(6));
    }
}
