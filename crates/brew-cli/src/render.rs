use brew_core::CoffeeStore;

/// Shown when a store has no photo of its own.
pub const DEFAULT_IMAGE_URL: &str = "https://images.unsplash.com/photo-1504753793650-d4a2b783c15e?ixid=MnwxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8&ixlib=rb-1.2.1&auto=format&fit=crop&w=2000&q=80";

fn image_or_default(store: &CoffeeStore) -> &str {
    if store.img_url.trim().is_empty() {
        DEFAULT_IMAGE_URL
    } else {
        &store.img_url
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        format!("{}...", text.chars().take(max).collect::<String>())
    } else {
        text.to_string()
    }
}

/// Card list of stores under `heading`; empty lists render nothing.
///
/// Ids are printed in full since they are what `store` and `upvote` take.
#[must_use]
pub fn render_store_list(heading: &str, stores: &[CoffeeStore]) -> String {
    if stores.is_empty() {
        return String::new();
    }

    let mut lines = vec![
        heading.to_string(),
        format!("{:<30}{:<34}ID", "NAME", "ADDRESS"),
    ];
    lines.extend(stores.iter().map(|store| {
        format!(
            "{:<30}{:<34}{}",
            truncate(&store.name, 27),
            truncate(&store.address, 30),
            store.id
        )
    }));
    lines.push(String::new());
    lines.join("\n")
}

/// Detail view of one store with its vote count.
#[must_use]
pub fn render_store_detail(store: &CoffeeStore) -> String {
    let mut lines = vec![
        store.name.clone(),
        format!("  id:            {}", store.id),
        format!("  address:       {}", store.address),
    ];
    if !store.neighbourhood.is_empty() {
        lines.push(format!("  neighbourhood: {}", store.neighbourhood));
    }
    lines.push(format!("  votes:         {}", store.voting));
    lines.push(format!("  image:         {}", image_or_default(store)));
    lines.push(String::new());
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> CoffeeStore {
        CoffeeStore {
            id: "abc".to_string(),
            name: "Joe's".to_string(),
            address: "1 Main St".to_string(),
            voting: 3,
            ..CoffeeStore::default()
        }
    }

    #[test]
    fn empty_list_renders_nothing() {
        assert_eq!(render_store_list("Stores near me", &[]), "");
    }

    #[test]
    fn list_includes_heading_and_each_store() {
        let out = render_store_list("Stores near me", &[store()]);
        assert!(out.starts_with("Stores near me\n"));
        assert!(out.contains("Joe's"));
        assert!(out.contains("1 Main St"));
    }

    #[test]
    fn detail_falls_back_to_default_image() {
        let out = render_store_detail(&store());
        assert!(out.contains(DEFAULT_IMAGE_URL));
        assert!(out.contains("votes:         3"));
        assert!(!out.contains("neighbourhood"));
    }

    #[test]
    fn detail_prefers_store_image() {
        let mut s = store();
        s.img_url = "https://img/1.jpg".to_string();
        s.neighbourhood = "Soho".to_string();
        let out = render_store_detail(&s);
        assert!(out.contains("https://img/1.jpg"));
        assert!(out.contains("neighbourhood: Soho"));
    }

    #[test]
    fn list_prints_long_ids_in_full() {
        let mut s = store();
        s.id = "4b5a8c1ef964a520d3d028e3-with-a-long-suffix".to_string();
        let out = render_store_list("Stores near me", &[s]);
        assert!(out.contains("4b5a8c1ef964a520d3d028e3-with-a-long-suffix\n"));
    }

    #[test]
    fn long_addresses_are_truncated() {
        assert_eq!(truncate("abcdef", 3), "abc...");
        assert_eq!(truncate("abc", 3), "abc");
    }
}
