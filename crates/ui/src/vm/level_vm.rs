use drill_core::model::Variant;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LevelCardVm {
    pub number: u8,
    pub title: String,
    pub label: &'static str,
    /// CSS hook for the badge color.
    pub tone: String,
}

#[must_use]
pub fn map_level_cards(variant: Variant) -> Vec<LevelCardVm> {
    variant
        .levels()
        .map(|level| LevelCardVm {
            number: level.number(),
            title: level.to_string(),
            label: level.label(),
            tone: format!("tone-{}", level.number()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_every_level_of_the_variant() {
        let standard = map_level_cards(Variant::Standard);
        assert_eq!(standard.len(), 7);
        assert_eq!(standard[0].title, "Lv.1");
        assert_eq!(standard[0].label, "1-digit ÷ 1-digit");
        assert_eq!(standard[6].tone, "tone-7");

        let classic = map_level_cards(Variant::Classic);
        assert_eq!(classic.len(), 6);
        assert_eq!(classic[3].label, "3-digit ÷ 1-digit, no remainder");
    }
}
