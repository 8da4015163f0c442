use super::*;
use crate::test_utils::{builtin_db, init_logger};

fn matcher() -> EffectMatcher {
    init_logger();
    EffectMatcher::with_defaults(builtin_db())
}

#[test]
fn test_match_boss_upside_with_rolled_value() {
    let result = matcher().match_effect(
        "FinalBossdrops3additionalDivineOrbs",
        "MapbossDropsAdditionalItems",
    );
    assert!(result.matched);
    assert!(result.is_upside);
    assert_eq!(
        result.canonical_id,
        "Boss|Final Boss drops # additional Divine Orbs"
    );
    assert_eq!(result.polarity(), Some(Polarity::Upside));
}

#[test]
fn test_match_minion_downside() {
    let result = matcher().match_effect("HitsalwaysIgnite", "EldritchMinions");
    assert!(result.matched);
    assert!(!result.is_upside);
    assert_eq!(result.canonical_id, "Minion|Hits always Ignite");
}

#[test]
fn test_same_text_resolves_per_target() {
    let m = matcher();
    let boss = m.match_effect("HitsalwaysIgnite", "Mapboss");
    let minion = m.match_effect("HitsalwaysIgnite", "EldritchMinions");
    assert_eq!(boss.canonical_id, "Boss|Hits always Ignite");
    assert_eq!(minion.canonical_id, "Minion|Hits always Ignite");
}

#[test]
fn test_no_substring_match() {
    let m = matcher();
    assert!(!m.match_effect("Bossdropsadditional", "Mapboss").matched);
    assert!(!m.match_effect("FinalBossdropsadditionalDivine", "Mapboss").matched);
    assert!(
        !m.match_effect("FinalBossdrops2additionalDivineOrbsandmore", "Mapboss").matched,
        "superstrings must not match either"
    );
}

#[test]
fn test_wrong_target_does_not_match() {
    let result = matcher().match_effect("12%increasedExperiencegain", "Mapboss");
    assert_eq!(result, MatchResult::unmatched());
}

#[test]
fn test_unknown_descriptor_does_not_match() {
    let result = matcher().match_effect("HitsalwaysIgnite", "Somethingelse");
    assert!(!result.matched);
    assert!(!result.is_upside);
    assert_eq!(result.canonical_id, "");
}

#[test]
fn test_empty_inputs_do_not_match() {
    let m = matcher();
    assert_eq!(m.match_effect("", "Mapboss"), MatchResult::unmatched());
    assert_eq!(m.match_effect("HitsalwaysIgnite", ""), MatchResult::unmatched());
    assert_eq!(m.match_effect("", ""), MatchResult::unmatched());
}

#[test]
fn test_cache_keyed_by_raw_input() {
    let m = matcher();
    let a = m.match_effect("FinalBossdrops3additionalDivineOrbs", "Mapboss");
    let b = m.match_effect("FinalBossdrops4additionalDivineOrbs", "Mapboss");
    assert_eq!(a, b);
    assert_eq!(m.cached_entries(), 2);

    m.match_effect("FinalBossdrops3additionalDivineOrbs", "Mapboss");
    assert_eq!(m.cached_entries(), 2);
}

#[test]
fn test_results_independent_of_cache_state() {
    let db = builtin_db();
    let cached = EffectMatcher::new(db.clone(), &TargetKeywords::default(), 100);
    let uncached = EffectMatcher::new(db, &TargetKeywords::default(), 0);
    let pairs = [
        ("FinalBossdrops3additionalDivineOrbs", "Mapboss"),
        ("HitsalwaysShock", "EldritchMinions"),
        ("-20%toChaosResistance", "Player"),
        ("Nonsense", "Player"),
    ];
    for _ in 0..3 {
        for (candidate, descriptor) in pairs {
            assert_eq!(
                cached.match_effect(candidate, descriptor),
                uncached.match_effect(candidate, descriptor)
            );
        }
    }
    assert_eq!(uncached.cached_entries(), 0);
}

#[test]
fn test_full_cache_still_matches() {
    let m = EffectMatcher::new(builtin_db(), &TargetKeywords::default(), 1);
    m.match_effect("HitsalwaysShock", "Mapboss");
    let overflow = m.match_effect("HitsalwaysIgnite", "Mapboss");
    assert_eq!(overflow.canonical_id, "Boss|Hits always Ignite");
    assert_eq!(m.cached_entries(), 1);
}

#[test]
fn test_legacy_cache_entry_repaired_on_read() {
    let m = matcher();
    let legacy = MatchResult {
        matched: true,
        is_upside: true,
        canonical_id: "Final Boss drops # additional Divine Orbs".to_string(),
    };
    assert!(m.seed("FinalBossdrops2additionalDivineOrbs", "Mapboss", legacy));

    let result = m.match_effect("FinalBossdrops2additionalDivineOrbs", "Mapboss");
    assert!(result.matched);
    assert!(result.is_upside);
    assert_eq!(
        result.canonical_id,
        "Boss|Final Boss drops # additional Divine Orbs"
    );

    let stored = m
        .cached("FinalBossdrops2additionalDivineOrbs", "Mapboss")
        .unwrap();
    assert_eq!(stored, result, "repaired entry is written back");
}

#[test]
fn test_legacy_cache_entry_without_target_recomputes() {
    let m = matcher();
    let legacy = MatchResult {
        matched: true,
        is_upside: false,
        canonical_id: "Hits always Ignite".to_string(),
    };
    m.seed("HitsalwaysIgnite", "Nobody", legacy);

    let result = m.match_effect("HitsalwaysIgnite", "Nobody");
    assert_eq!(result, MatchResult::unmatched());
}

#[test]
fn test_prefixed_cache_entry_served_as_is() {
    let m = matcher();
    let seeded = MatchResult {
        matched: true,
        is_upside: false,
        canonical_id: "Player|Projectiles are fired in random directions".to_string(),
    };
    m.seed("whatever", "Player", seeded.clone());
    assert_eq!(m.match_effect("whatever", "Player"), seeded);
}

#[test]
fn test_custom_keywords() {
    let keywords = TargetKeywords {
        boss: vec!["Guardian".into()],
        ..TargetKeywords::default()
    };
    let m = EffectMatcher::new(builtin_db(), &keywords, 10);
    assert_eq!(m.classify("Guardian"), Some(TargetCategory::Boss));
    assert_eq!(m.classify("Mapboss"), None);
    assert!(m.match_effect("HitsalwaysShock", "Guardian").matched);
}

#[test]
fn test_suggest_nearest_effect() {
    let m = matcher();
    let suggestion = m
        .suggest("FinalBossdrops2additionalDivineOrb")
        .expect("close to a known id");
    assert_eq!(
        suggestion.canonical_id,
        "Boss|Final Boss drops # additional Divine Orbs"
    );
    assert!(suggestion.similarity > 0.9);

    assert!(m.suggest("zzzz").is_none());
    assert!(m.suggest("").is_none());
}
