//! Grouping of the flat history list into conversations.
//!
//! The grouping is order-preserving: groups are created in the order
//! their session id first appears in the input, so the result is
//! deterministic regardless of map iteration order. The final listing
//! is then sorted by most recent activity, newest first.

use std::collections::HashMap;

use super::model::{Conversation, derive_title};
use crate::history::HistoryItem;

/// Groups a flat history list into conversations.
///
/// - Items are bucketed by `session_id`, first occurrence first.
/// - Each conversation's items are sorted by ascending timestamp
///   (stable, so same-timestamp items keep their server order).
/// - The title is derived from the chronologically earliest query.
/// - Conversations are ordered by their latest item's timestamp,
///   newest first.
pub fn group_into_conversations(items: Vec<HistoryItem>) -> Vec<Conversation> {
    let mut index_by_session: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<Conversation> = Vec::new();

    for item in items {
        match index_by_session.get(&item.session_id) {
            Some(&idx) => groups[idx].items.push(item),
            None => {
                index_by_session.insert(item.session_id.clone(), groups.len());
                groups.push(Conversation {
                    id: item.session_id.clone(),
                    title: String::new(),
                    items: vec![item],
                });
            }
        }
    }

    for group in &mut groups {
        group
            .items
            .sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
        group.title = derive_title(&group.items[0].query);
    }

    // Newest activity first; the sort is stable, so conversations with
    // identical latest timestamps keep first-occurrence order.
    groups.sort_by(|a, b| b.latest_activity().cmp(&a.latest_activity()));

    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(session_id: &str, query: &str, timestamp: &str) -> HistoryItem {
        HistoryItem {
            query: query.to_string(),
            ai_response: format!("answer to {query}"),
            session_id: session_id.to_string(),
            user_id: "user_test".to_string(),
            timestamp: timestamp.to_string(),
        }
    }

    #[test]
    fn test_items_grouped_by_session_and_sorted_by_time() {
        let conversations = group_into_conversations(vec![
            item("s1", "second question", "2025-06-01T10:05:00"),
            item("s2", "other topic", "2025-06-01T09:00:00"),
            item("s1", "first question", "2025-06-01T10:00:00"),
        ]);

        assert_eq!(conversations.len(), 2);
        let s1 = conversations.iter().find(|c| c.id == "s1").unwrap();
        assert_eq!(s1.items.len(), 2);
        assert_eq!(s1.items[0].query, "first question");
        assert_eq!(s1.items[1].query, "second question");
    }

    #[test]
    fn test_title_comes_from_earliest_item() {
        let conversations = group_into_conversations(vec![
            item("s1", "follow-up", "2025-06-01T10:05:00"),
            item("s1", "Do I need a visa for Japan?", "2025-06-01T10:00:00"),
        ]);

        assert_eq!(conversations[0].title, "Do I need a visa for Japan?");
    }

    #[test]
    fn test_conversations_ordered_newest_first() {
        let conversations = group_into_conversations(vec![
            item("old", "old chat", "2025-05-01T10:00:00"),
            item("new", "new chat", "2025-06-01T10:00:00"),
        ]);

        assert_eq!(conversations[0].id, "new");
        assert_eq!(conversations[1].id, "old");
    }

    #[test]
    fn test_grouping_is_deterministic_for_ties() {
        // Same latest timestamp: first occurrence in the input wins.
        let input = vec![
            item("a", "alpha", "2025-06-01T10:00:00"),
            item("b", "beta", "2025-06-01T10:00:00"),
            item("c", "gamma", "2025-06-01T10:00:00"),
        ];
        for _ in 0..8 {
            let conversations = group_into_conversations(input.clone());
            let order: Vec<&str> = conversations.iter().map(|c| c.id.as_str()).collect();
            assert_eq!(order, vec!["a", "b", "c"]);
        }
    }

    #[test]
    fn test_empty_history_yields_no_conversations() {
        assert!(group_into_conversations(Vec::new()).is_empty());
    }
}
