mod common;

use common::{person, photo};
use trombi_core::{
    AssociationEngine, AssociationPolicy, MatchEligibility, Photo, PhotoId, ReassignPolicy,
    TrombiError,
};

fn team() -> Vec<trombi_core::Person> {
    vec![
        person(0, "Jean", "Dupont", "REF1"),
        person(1, "Claire", "Martin", "REF2"),
        person(2, "Paul", "Durand", "REF3"),
    ]
}

fn pool_names(engine: &AssociationEngine) -> Vec<String> {
    engine
        .unassigned()
        .iter()
        .map(|e| e.photo.name().to_string())
        .collect()
}

#[test]
fn assign_moves_photo_out_of_the_pool() {
    let mut engine = AssociationEngine::with_persons(team(), AssociationPolicy::default());
    engine.add_photos([photo("a.jpg"), photo("b.png")]);

    let m = engine.assign(1, 2).expect("assign");
    assert_eq!(m.file_name, "Durand_Paul_REF3.png");
    assert!(m.photo_preview.starts_with("data:image/png;base64,"));
    assert_eq!(pool_names(&engine), vec!["a.jpg"]);
    assert_eq!(engine.mappings().len(), 1);
}

#[test]
fn at_most_one_mapping_per_person() {
    let mut engine = AssociationEngine::with_persons(team(), AssociationPolicy::default());
    engine.add_photos([photo("a.jpg"), photo("b.jpg"), photo("c.jpg")]);

    engine.assign(0, 1).unwrap();
    engine.assign(0, 1).unwrap();
    engine.assign(0, 1).unwrap();

    let mappings = engine.mappings();
    assert_eq!(mappings.len(), 1);
    assert_eq!(mappings[0].person.id, 1);
    assert_eq!(mappings[0].photo.name(), "c.jpg");
}

#[test]
fn reassign_discards_displaced_photo_by_default() {
    let mut engine = AssociationEngine::with_persons(team(), AssociationPolicy::default());
    let ids = engine.add_photos([photo("first.jpg"), photo("second.jpg")]);

    engine.assign(0, 0).unwrap();
    engine.assign(0, 0).unwrap();

    assert!(engine.unassigned().is_empty());
    assert_eq!(engine.mapping_for(0).unwrap().photo_id, ids[1]);
    assert!(engine.person_for(ids[0]).is_none());
}

#[test]
fn reassign_can_return_displaced_photo() {
    let mut engine =
        AssociationEngine::with_persons(team(), AssociationPolicy::returning_displaced());
    let ids = engine.add_photos([photo("first.jpg"), photo("second.jpg")]);

    engine.assign(0, 0).unwrap();
    engine.assign(0, 0).unwrap();

    assert_eq!(pool_names(&engine), vec!["first.jpg"]);
    assert_eq!(engine.unassigned()[0].id, ids[0]);
    assert_eq!(engine.person_for(ids[1]).map(|p| p.id), Some(0));
}

#[test]
fn remove_returns_photo_to_pool_exactly_once() {
    let mut engine = AssociationEngine::with_persons(team(), AssociationPolicy::default());
    let ids = engine.add_photos([photo("a.jpg"), photo("b.jpg")]);
    engine.assign(0, 1).unwrap();

    let returned = engine.remove(1).expect("remove");
    assert_eq!(returned, ids[0]);
    assert!(engine.mapping_for(1).is_none());
    let count = engine
        .unassigned()
        .iter()
        .filter(|e| e.id == ids[0])
        .count();
    assert_eq!(count, 1);
    assert_eq!(pool_names(&engine), vec!["b.jpg", "a.jpg"]);

    let err = engine.remove(1).unwrap_err();
    assert!(matches!(err, TrombiError::NotMapped(1)));
    assert_eq!(engine.unassigned().len(), 2);
}

#[test]
fn invalid_assign_changes_nothing() {
    let mut engine = AssociationEngine::with_persons(team(), AssociationPolicy::default());
    engine.add_photos([photo("a.jpg")]);

    let err = engine.assign(0, 42).unwrap_err();
    assert!(matches!(err, TrombiError::UnknownPerson(42)));
    let err = engine.assign(5, 0).unwrap_err();
    assert!(matches!(
        err,
        TrombiError::PhotoIndexOutOfRange { index: 5, len: 1 }
    ));
    assert_eq!(engine.unassigned().len(), 1);
    assert!(engine.mappings().is_empty());
}

#[test]
fn unreadable_photo_stays_in_pool() {
    let dir = tempfile::tempdir().unwrap();
    let mut engine = AssociationEngine::with_persons(team(), AssociationPolicy::default());
    engine.add_photo(Photo::from_path(dir.path().join("gone.jpg")).unwrap());

    let err = engine.assign(0, 0).unwrap_err();
    assert!(matches!(err, TrombiError::Io(_)));
    assert_eq!(pool_names(&engine), vec!["gone.jpg"]);
    assert!(engine.mappings().is_empty());
}

#[test]
fn auto_match_by_names_or_reference() {
    let mut engine = AssociationEngine::with_persons(team(), AssociationPolicy::default());
    let ids = engine.add_photos([
        photo("DUPONT jean.jpg"),
        photo("scan_ref2.jpg"),
        photo("holiday.jpg"),
        photo("durand.jpg"),
    ]);

    let report = engine.auto_match().expect("auto-match");
    assert_eq!(report.count(), 2);
    assert_eq!(report.matched, vec![(ids[0], 0), (ids[1], 1)]);
    assert_eq!(report.remaining, 2);
    assert_eq!(pool_names(&engine), vec!["holiday.jpg", "durand.jpg"]);
    assert_eq!(
        engine.mapping_for(0).unwrap().file_name,
        "Dupont_Jean_REF1.jpg"
    );
}

#[test]
fn auto_match_twice_finds_nothing_new() {
    let mut engine = AssociationEngine::with_persons(team(), AssociationPolicy::default());
    engine.add_photos([photo("Dupont_Jean.jpg"), photo("unknown.jpg")]);

    assert_eq!(engine.auto_match().unwrap().count(), 1);
    let second = engine.auto_match().unwrap();
    assert_eq!(second.count(), 0);
    assert_eq!(second.remaining, 1);
    assert_eq!(engine.mappings().len(), 1);
}

#[test]
fn auto_match_needs_photos_and_persons() {
    let mut engine = AssociationEngine::with_persons(team(), AssociationPolicy::default());
    let err = engine.auto_match().unwrap_err();
    assert!(matches!(
        err,
        TrombiError::NothingToMatch {
            photos: 0,
            persons: 3
        }
    ));

    let mut engine = AssociationEngine::new(AssociationPolicy::default());
    engine.add_photos([photo("Dupont_Jean.jpg")]);
    let err = engine.auto_match().unwrap_err();
    assert!(matches!(err, TrombiError::NothingToMatch { photos: 1, persons: 0 }));
    assert_eq!(engine.unassigned().len(), 1);
}

#[test]
fn auto_match_leaves_existing_mappings_alone() {
    let mut engine = AssociationEngine::with_persons(team(), AssociationPolicy::default());
    let ids = engine.add_photos([photo("manual.jpg"), photo("Dupont_Jean_v2.jpg")]);
    engine.assign(0, 0).unwrap();

    let report = engine.auto_match().unwrap();
    assert_eq!(report.count(), 0);
    assert_eq!(engine.mapping_for(0).unwrap().photo_id, ids[0]);
    assert_eq!(pool_names(&engine), vec!["Dupont_Jean_v2.jpg"]);
}

#[test]
fn shared_reference_spreads_over_persons() {
    let persons = vec![
        person(0, "Jean", "Dupont", "CHANTIER"),
        person(1, "Claire", "Martin", "CHANTIER"),
    ];
    let mut engine = AssociationEngine::with_persons(persons, AssociationPolicy::default());
    let ids = engine.add_photos([photo("chantier_1.jpg"), photo("chantier_2.jpg")]);

    let report = engine.auto_match().unwrap();
    assert_eq!(report.matched, vec![(ids[0], 0), (ids[1], 1)]);
}

#[test]
fn any_person_eligibility_lets_first_match_win() {
    let persons = vec![
        person(0, "Jean", "Dupont", "CHANTIER"),
        person(1, "Claire", "Martin", "CHANTIER"),
    ];
    let policy = AssociationPolicy {
        auto_match: MatchEligibility::AnyPerson,
        ..Default::default()
    };
    let mut engine = AssociationEngine::with_persons(persons, policy);
    let ids = engine.add_photos([photo("chantier_1.jpg"), photo("chantier_2.jpg")]);

    let report = engine.auto_match().unwrap();
    assert_eq!(report.matched, vec![(ids[0], 0), (ids[1], 0)]);
    assert_eq!(engine.mapping_for(0).unwrap().photo_id, ids[1]);
    assert!(engine.mapping_for(1).is_none());
    assert!(engine.unassigned().is_empty());
}

#[test]
fn any_person_eligibility_follows_reassign_policy() {
    let policy = AssociationPolicy {
        on_reassign: ReassignPolicy::ReturnToPool,
        auto_match: MatchEligibility::AnyPerson,
    };
    let mut engine = AssociationEngine::with_persons(team(), policy);
    engine.add_photos([photo("a.jpg")]);
    engine.assign(0, 0).unwrap();
    let ids = engine.add_photos([photo("dupont_jean_v2.jpg")]);

    let report = engine.auto_match().unwrap();
    assert_eq!(report.matched, vec![(ids[0], 0)]);
    assert_eq!(engine.mapping_for(0).unwrap().photo_id, ids[0]);
    assert_eq!(pool_names(&engine), vec!["a.jpg"]);
}

#[test]
fn attach_skips_the_pool() {
    let mut engine = AssociationEngine::with_persons(team(), AssociationPolicy::default());
    engine.add_photos([photo("pooled.jpg")]);

    let m = engine.attach(photo("direct.webp"), 1).expect("attach");
    assert_eq!(m.file_name, "Martin_Claire_REF2.webp");
    let attached: PhotoId = m.photo_id;
    assert_eq!(pool_names(&engine), vec!["pooled.jpg"]);
    assert_ne!(attached, engine.unassigned()[0].id);

    assert!(matches!(
        engine.attach(photo("x.jpg"), 9).unwrap_err(),
        TrombiError::UnknownPerson(9)
    ));
}

#[test]
fn new_person_list_releases_every_photo() {
    let mut engine = AssociationEngine::with_persons(team(), AssociationPolicy::default());
    engine.add_photos([photo("a.jpg"), photo("b.jpg")]);
    engine.assign(0, 0).unwrap();
    engine.assign(0, 1).unwrap();

    engine.load_persons(vec![person(0, "Léa", "Roux", "NEW")]);
    assert!(engine.mappings().is_empty());
    assert_eq!(engine.unassigned().len(), 2);
    assert_eq!(engine.persons().len(), 1);
}

#[test]
fn file_names_stay_canonical() {
    let mut engine = AssociationEngine::with_persons(team(), AssociationPolicy::default());
    engine.add_photos([photo("a.JPG"), photo("b")]);
    engine.assign(0, 0).unwrap();
    engine.assign(0, 2).unwrap();

    assert_eq!(engine.regenerate_file_names(), 0);
    let names: Vec<_> = engine
        .mappings()
        .iter()
        .map(|m| m.file_name.clone())
        .collect();
    assert_eq!(names, vec!["Dupont_Jean_REF1.JPG", "Durand_Paul_REF3.jpg"]);
}
