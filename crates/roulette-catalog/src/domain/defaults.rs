//! Built-in catalog content, used until the content store holds a saved
//! version and whenever it returns nothing.

use std::collections::BTreeMap;

use super::catalog::{
    ActionCatalog, JokerCatalog, JokerTemplate, PlayersNeeded, Tier, ZoneCatalog, ZoneSet,
};

fn list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_owned()).collect()
}

/// Default action phrases.
#[must_use]
pub fn actions() -> ActionCatalog {
    ActionCatalog(BTreeMap::from([
        (
            Tier::Gentle,
            list(&[
                "touches",
                "strokes",
                "tickles",
                "brushes",
                "whispers to",
                "breathes on",
                "blows softly on",
                "kisses tenderly",
                "smells",
            ]),
        ),
        (
            Tier::Medium,
            list(&[
                "kisses",
                "rubs",
                "massages",
                "slides a fingertip along",
                "nibbles",
                "presses against",
                "traces a circle on",
            ]),
        ),
        (
            Tier::Intense,
            list(&[
                "kisses passionately",
                "caresses slowly",
                "nibbles gently",
                "lingers with a kiss on",
                "massages with warm oil",
            ]),
        ),
        (
            Tier::Fusion,
            list(&[
                "The Slow Dance",
                "The Embrace",
                "The Lotus",
                "The Spoon",
                "The Mirror",
                "The Waltz",
            ]),
        ),
    ]))
}

/// Default body-zone phrases. Only the intense tier has gender-specific
/// entries.
#[must_use]
pub fn body_parts() -> ZoneCatalog {
    ZoneCatalog(BTreeMap::from([
        (
            Tier::Gentle,
            ZoneSet {
                neutral: list(&[
                    "the neck",
                    "the ear",
                    "the earlobe",
                    "the nape",
                    "the shoulder",
                    "the arm",
                    "the hand",
                    "the palm",
                    "the fingers",
                    "the wrist",
                    "the forehead",
                    "the temple",
                    "the cheek",
                    "the calf",
                    "the ankle",
                    "the hair",
                ]),
                gender_a: Vec::new(),
                gender_b: Vec::new(),
            },
        ),
        (
            Tier::Medium,
            ZoneSet {
                neutral: list(&[
                    "the chest",
                    "the stomach",
                    "the navel",
                    "the lower back",
                    "the thigh",
                    "the knee",
                    "the hip",
                    "the spine",
                    "the lips",
                    "the jaw",
                ]),
                gender_a: Vec::new(),
                gender_b: Vec::new(),
            },
        ),
        (
            Tier::Intense,
            ZoneSet {
                neutral: list(&[
                    "the inner thigh",
                    "the small of the back",
                    "the collarbone",
                    "the hollow of the throat",
                ]),
                gender_a: list(&["the beard line", "the adam's apple"]),
                gender_b: list(&["the neckline", "the back of the knee"]),
            },
        ),
    ]))
}

fn joker(id: &str, template: &str, players_needed: PlayersNeeded, accessories: &[&str]) -> JokerTemplate {
    JokerTemplate {
        id: id.to_owned(),
        template: template.to_owned(),
        players_needed,
        accessories: list(accessories),
    }
}

/// Default joker templates for levels 1 to 5. Level 6 has none: its rounds
/// are group challenges.
#[must_use]
pub fn joker_challenges() -> JokerCatalog {
    use PlayersNeeded::{All, One, Three, Two};

    JokerCatalog(BTreeMap::from([
        (
            "level1".to_owned(),
            vec![
                joker(
                    "joker1-1",
                    "**The steady gaze:** {player1} and {player2} look into each other's eyes without laughing.",
                    Two,
                    &[],
                ),
                joker(
                    "joker1-2",
                    "**The back-rub chain:** everyone sits in a circle and rubs the back of the person in front.",
                    All,
                    &[],
                ),
                joker(
                    "joker1-3",
                    "**The mime:** {player1} mimes something seductive and the others guess what it is.",
                    One,
                    &[],
                ),
                joker(
                    "joker1-4",
                    "**The perfume test:** {player1} guesses the perfume of {player2} from their neck.",
                    Two,
                    &[],
                ),
                joker(
                    "joker1-5",
                    "**The whisper relay:** {player1} whispers a cheeky secret to {player2}, who passes it on to {player3}.",
                    Three,
                    &[],
                ),
                joker(
                    "joker1-6",
                    "**The group pose:** the whole group strikes a suggestive pose for a photo.",
                    All,
                    &["camera"],
                ),
            ],
        ),
        (
            "level2".to_owned(),
            vec![
                joker(
                    "joker2-1",
                    "**The foot massage:** {player1} massages the feet of {player2}.",
                    Two,
                    &[],
                ),
                joker(
                    "joker2-2",
                    "**The blind tasting:** {player1} feeds {player2} something to taste, blindfolded.",
                    Two,
                    &["blindfold"],
                ),
                joker(
                    "joker2-3",
                    "**The reading:** {player1} reads a short romantic passage aloud to the group.",
                    One,
                    &[],
                ),
                joker(
                    "joker2-4",
                    "**Never have I ever:** the group plays a spicier round; whoever has done it drinks.",
                    All,
                    &[],
                ),
                joker(
                    "joker2-5",
                    "**The tied hands:** {player1} and {player2} have one hand tied together and pour a drink as a team.",
                    Two,
                    &["scarf"],
                ),
            ],
        ),
        (
            "level3".to_owned(),
            vec![
                joker(
                    "joker3-1",
                    "**The surprise kiss:** {player1} gives {player2} a surprise kiss on the cheek or the neck.",
                    Two,
                    &[],
                ),
                joker(
                    "joker3-2",
                    "**The ice cube:** an ice cube is passed from body to body until it melts.",
                    All,
                    &["ice cube"],
                ),
                joker(
                    "joker3-3",
                    "**The breathing duet:** {player1} and {player2} stand face to face and synchronise their breathing.",
                    Two,
                    &[],
                ),
                joker(
                    "joker3-4",
                    "**The close dance:** {player1} and {player2} slow dance through one song.",
                    Two,
                    &[],
                ),
                joker(
                    "joker3-5",
                    "**The trio massage:** {player1} and {player2} give {player3} a shoulder massage together.",
                    Three,
                    &[],
                ),
            ],
        ),
        (
            "level4".to_owned(),
            vec![
                joker(
                    "joker4-1",
                    "**The long kiss:** {player1} and {player2} kiss for thirty seconds.",
                    Two,
                    &[],
                ),
                joker(
                    "joker4-2",
                    "**The dance:** {player1} performs a seductive dance for the group.",
                    One,
                    &[],
                ),
                joker(
                    "joker4-3",
                    "**The blindfolded guess:** {player1}, blindfolded, must recognise {player2} by touch alone.",
                    Two,
                    &["blindfold"],
                ),
                joker(
                    "joker4-4",
                    "**The whispered fantasy:** {player1} whispers a fantasy to {player2}, who repeats it aloud.",
                    Two,
                    &[],
                ),
                joker(
                    "joker4-5",
                    "**Card game forfeits:** the group plays a round of cards; each loser removes one item of clothing.",
                    All,
                    &["deck of cards"],
                ),
            ],
        ),
        (
            "level5".to_owned(),
            vec![
                joker(
                    "joker5-1",
                    "**The body shot:** {player1} drinks a shot from the collarbone of {player2}.",
                    Two,
                    &["shot glass"],
                ),
                joker(
                    "joker5-2",
                    "**The ultimate dance:** {player1} performs a full dance for the group.",
                    One,
                    &[],
                ),
                joker(
                    "joker5-3",
                    "**The confession:** every player reveals the boldest fantasy they have never acted on.",
                    All,
                    &[],
                ),
                joker(
                    "joker5-4",
                    "**The oil massage:** {player1} and {player2} give each other a massage.",
                    Two,
                    &["massage oil"],
                ),
                joker(
                    "joker5-5",
                    "**The triangle:** {player1}, {player2} and {player3} share a three-way embrace for a whole song.",
                    Three,
                    &[],
                ),
            ],
        ),
    ]))
}
