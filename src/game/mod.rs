use crate::models::Game;

fn game(id: &str, name: &str, icon: &str, modules: &[&str], color: &str) -> Game {
    Game {
        id: id.to_string(),
        name: name.to_string(),
        icon: icon.to_string(),
        modules: modules.iter().map(|m| m.to_string()).collect(),
        color: color.to_string(),
    }
}

/// Games a document can target, in selector order.
pub fn available_games() -> Vec<Game> {
    vec![
        game(
            "tft",
            "Teamfight Tactics",
            "chess",
            &["tft-builder"],
            "bg-blue-500",
        ),
        game(
            "lol",
            "League of Legends",
            "swords",
            &["lol-champions", "lol-items", "lol-runes", "lol-abilities"],
            "bg-red-500",
        ),
        game(
            "valorant",
            "Valorant",
            "target",
            &["valorant-agents"],
            "bg-pink-600",
        ),
        game(
            "bg3",
            "Baldur's Gate 3",
            "dices",
            &["bg3-builder"],
            "bg-purple-600",
        ),
    ]
}

pub fn find_game(id: &str) -> Option<Game> {
    available_games().into_iter().find(|g| g.id == id)
}

/// Module kinds legal for the selected game. Empty when nothing is selected.
pub fn available_modules(selected: Option<&Game>) -> Vec<String> {
    selected.map(|g| g.modules.clone()).unwrap_or_default()
}

/// Whether a module kind may be offered. With no game selected every module is.
pub fn module_allowed(selected: Option<&Game>, module_type: &str) -> bool {
    match selected {
        Some(g) => g.modules.iter().any(|m| m == module_type),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_games_have_unique_ids_and_modules() {
        let games = available_games();
        assert_eq!(games.len(), 4);
        let mut ids: Vec<&str> = games.iter().map(|g| g.id.as_str()).collect();
        ids.dedup();
        assert_eq!(ids.len(), 4);
        assert!(games.iter().all(|g| !g.modules.is_empty()));
    }

    #[test]
    fn test_available_modules_follow_selection() {
        let lol = find_game("lol").expect("lol");
        assert_eq!(
            available_modules(Some(&lol)),
            vec!["lol-champions", "lol-items", "lol-runes", "lol-abilities"]
        );
        assert!(available_modules(None).is_empty());
    }

    #[test]
    fn test_module_allowed() {
        let tft = find_game("tft").expect("tft");
        assert!(module_allowed(Some(&tft), "tft-builder"));
        assert!(!module_allowed(Some(&tft), "lol-items"));
        assert!(module_allowed(None, "lol-items"));
        assert!(find_game("chess").is_none());
    }
}
