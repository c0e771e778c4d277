//! Integration tests for `SqliteStore` against an in-memory database.

use roster_core::{
  enrich::{EnrichError, Enricher, Enrichment},
  person::{NewPerson, Person, PersonPatch},
  query::{Filter, Page, PersonQuery},
  service::{PersonService, ServiceError},
  store::{FailureKind, PersonStore, StoreFailure},
};

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn new_person(name: &str, surname: &str, gender: &str) -> NewPerson {
  NewPerson {
    name:        name.into(),
    surname:     surname.into(),
    patronymic:  String::new(),
    age:         30,
    gender:      gender.into(),
    nationality: "RU".into(),
  }
}

async fn by_id(s: &SqliteStore, id: i64) -> Person {
  s.select(PersonQuery::ById(id)).await.unwrap().remove(0)
}

fn filtered(field: &str, value: &str, page: Page) -> PersonQuery {
  PersonQuery::Filtered { filter: Filter::parse(field, value).unwrap(), page }
}

// ─── Create ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_normalizes_and_assigns_ids() {
  let s = store().await;

  let mut input = new_person("  ivan ", "PETROV", "MALE");
  input.patronymic = "sergeevich".into();
  input.nationality = "ru".into();

  let first = s.create(input).await.unwrap();
  assert_eq!(first.name, "Ivan");
  assert_eq!(first.surname, "Petrov");
  assert_eq!(first.patronymic, "Sergeevich");
  assert_eq!(first.gender, "male");
  assert_eq!(first.nationality, "RU");

  let second = s.create(new_person("anna", "petrova", "female")).await.unwrap();
  assert!(second.id > first.id);

  assert_eq!(by_id(&s, first.id).await, first);
}

#[tokio::test]
async fn create_rejected_by_check_constraint() {
  let s = store().await;

  let mut input = new_person("old", "man", "male");
  input.age = 200;
  let err = s.create(input).await.unwrap_err();
  assert_eq!(err.kind(), FailureKind::ConstraintViolated);

  let err = s.create(new_person("", "doe", "male")).await.unwrap_err();
  assert_eq!(err.kind(), FailureKind::ConstraintViolated);

  let all = s.select(PersonQuery::All { page: Page::default() }).await.unwrap_err();
  assert!(matches!(all, Error::NoMatches));
}

// ─── Select ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn select_absent_id_is_not_found() {
  let s = store().await;
  let err = s.select(PersonQuery::ById(404)).await.unwrap_err();
  assert!(matches!(err, Error::PersonNotFound(404)));
  assert_eq!(err.kind(), FailureKind::NotFound);
}

#[tokio::test]
async fn filter_matches_regardless_of_input_casing() {
  let s = store().await;
  s.create(new_person("ivan", "petrov", "male")).await.unwrap();
  s.create(new_person("anna", "petrova", "female")).await.unwrap();

  let upper = s.select(filtered("gender", "MALE", Page::default())).await.unwrap();
  let lower = s.select(filtered("gender", "male", Page::default())).await.unwrap();
  assert_eq!(upper, lower);
  assert_eq!(upper.len(), 1);
  assert_eq!(upper[0].name, "Ivan");

  let by_age = s.select(filtered("age", "30", Page::default())).await.unwrap();
  assert_eq!(by_age.len(), 2);
}

#[tokio::test]
async fn pagination_is_ordered_by_id() {
  let s = store().await;
  let mut ids = Vec::new();
  for name in ["a", "b", "c", "d", "e"] {
    ids.push(s.create(new_person(name, "smith", "male")).await.unwrap().id);
  }

  let page = Page::window(1, 3).unwrap();
  let got: Vec<_> = s
    .select(filtered("surname", "SMITH", page))
    .await
    .unwrap()
    .into_iter()
    .map(|p| p.id)
    .collect();
  assert_eq!(got, ids[1..4]);

  let tail = s
    .select(PersonQuery::All { page: Page::window(3, 100).unwrap() })
    .await
    .unwrap();
  assert_eq!(tail.len(), 2);
  assert_eq!(tail[0].name, "D");

  let past_end = s
    .select(PersonQuery::All { page: Page::window(5, 10).unwrap() })
    .await
    .unwrap_err();
  assert!(matches!(past_end, Error::NoMatches));
}

#[tokio::test]
async fn window_end_is_a_row_count_not_a_position() {
  let s = store().await;
  for name in ["a", "b", "c", "d"] {
    s.create(new_person(name, "jones", "female")).await.unwrap();
  }

  let rows = s
    .select(filtered("gender", "female", Page::window(1, 3).unwrap()))
    .await
    .unwrap();
  let names: Vec<_> = rows.iter().map(|p| p.name.as_str()).collect();
  assert_eq!(names, ["B", "C", "D"]);
}

#[tokio::test]
async fn filter_without_matches_is_not_found() {
  let s = store().await;
  s.create(new_person("ivan", "petrov", "male")).await.unwrap();

  let err = s.select(filtered("nationality", "us", Page::default())).await.unwrap_err();
  assert_eq!(err.kind(), FailureKind::NotFound);
}

#[tokio::test]
async fn injection_shaped_filter_value_is_just_data() {
  let s = store().await;
  s.create(new_person("ivan", "petrov", "male")).await.unwrap();

  let err = s
    .select(filtered("name", "x' OR '1'='1", Page::default()))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::NoMatches));
}

// ─── Update ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn identical_patch_reports_no_new_values() {
  let s = store().await;
  let p = s.create(new_person("ivan", "petrov", "male")).await.unwrap();

  let patch = PersonPatch {
    name: "IVAN".into(),
    gender: "Male".into(),
    age: 30,
    ..Default::default()
  };
  let err = s.update_by_id(p.id, patch).await.unwrap_err();
  assert!(matches!(err, Error::NoNewValues(id) if id == p.id));
  assert_eq!(err.kind(), FailureKind::NoNewValues);

  assert_eq!(by_id(&s, p.id).await, p);
}

#[tokio::test]
async fn update_missing_id_is_not_found() {
  let s = store().await;
  let patch = PersonPatch { name: "anna".into(), ..Default::default() };
  let err = s.update_by_id(999, patch).await.unwrap_err();
  assert!(matches!(err, Error::PersonNotFound(999)));
}

#[tokio::test]
async fn partial_update_touches_only_given_fields() {
  let s = store().await;
  let p = s.create(new_person("ivan", "petrov", "male")).await.unwrap();

  let patch = PersonPatch { surname: "sidorov".into(), age: 31, ..Default::default() };
  s.update_by_id(p.id, patch).await.unwrap();

  let after = by_id(&s, p.id).await;
  assert_eq!(after.surname, "Sidorov");
  assert_eq!(after.age, 31);
  assert_eq!(after.name, p.name);
  assert_eq!(after.gender, p.gender);
  assert_eq!(after.nationality, p.nationality);
}

#[tokio::test]
async fn constraint_violation_leaves_row_unchanged() {
  let s = store().await;
  let p = s.create(new_person("ivan", "petrov", "male")).await.unwrap();

  let patch = PersonPatch { surname: "ivanov".into(), gender: "robot".into(), ..Default::default() };
  let err = s.update_by_id(p.id, patch).await.unwrap_err();
  assert_eq!(err.kind(), FailureKind::ConstraintViolated);

  assert_eq!(by_id(&s, p.id).await, p);
}

#[tokio::test]
async fn concurrent_disjoint_updates_both_land() {
  let s = store().await;
  let p = s.create(new_person("ivan", "petrov", "male")).await.unwrap();

  let other = s.clone();
  let (a, b) = tokio::join!(
    s.update_by_id(p.id, PersonPatch { name: "pyotr".into(), ..Default::default() }),
    other.update_by_id(p.id, PersonPatch { nationality: "kz".into(), ..Default::default() }),
  );
  a.unwrap();
  b.unwrap();

  let after = by_id(&s, p.id).await;
  assert_eq!(after.name, "Pyotr");
  assert_eq!(after.nationality, "KZ");
}

// ─── Delete ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn delete_then_delete_again() {
  let s = store().await;
  let p = s.create(new_person("ivan", "petrov", "male")).await.unwrap();

  s.delete_by_id(p.id).await.unwrap();
  assert!(matches!(
    s.select(PersonQuery::ById(p.id)).await.unwrap_err(),
    Error::PersonNotFound(_)
  ));

  let err = s.delete_by_id(p.id).await.unwrap_err();
  assert!(matches!(err, Error::PersonNotFound(id) if id == p.id));
}

// ─── Lifecycle ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn operations_after_close_are_internal() {
  let s = store().await;
  let handle = s.clone();
  s.close().await.unwrap();

  let err = handle.select(PersonQuery::ById(1)).await.unwrap_err();
  assert!(matches!(err, Error::Database(_)));
  assert_eq!(err.kind(), FailureKind::Internal);
}

#[tokio::test]
async fn open_on_disk_persists_across_reopen() {
  let path = std::env::temp_dir().join(format!("roster-store-{}.db", std::process::id()));
  let _ = std::fs::remove_file(&path);

  let s = SqliteStore::open(&path).await.unwrap();
  let p = s.create(new_person("ivan", "petrov", "male")).await.unwrap();
  s.close().await.unwrap();

  let s = SqliteStore::open(&path).await.unwrap();
  assert_eq!(by_id(&s, p.id).await, p);
  s.close().await.unwrap();
  let _ = std::fs::remove_file(&path);
}

// ─── Through the service ─────────────────────────────────────────────────────

struct FixedEnricher;

impl Enricher for FixedEnricher {
  async fn enrich(&self, name: &str) -> Result<Enrichment, EnrichError> {
    match name {
      "john" => Ok(Enrichment { age: 42, gender: "male".into(), nationality: "US".into() }),
      _ => Err(EnrichError::NotFound {
        lookup: roster_core::enrich::Lookup::Age,
        name:   name.to_owned(),
      }),
    }
  }
}

#[tokio::test]
async fn service_create_then_select_round_trip() {
  let svc = PersonService::new(store().await, FixedEnricher);

  let created = svc.create("john", "doe", "").await.unwrap();
  assert_eq!(created.name, "John");
  assert_eq!(created.surname, "Doe");
  assert_eq!(created.patronymic, "");
  assert_eq!(created.age, 42);
  assert_eq!(created.gender, "male");
  assert_eq!(created.nationality, "US");

  let fetched = svc.select(PersonQuery::ById(created.id)).await.unwrap();
  assert_eq!(fetched, vec![created]);
}

#[tokio::test]
async fn service_enrichment_failure_writes_nothing() {
  let svc = PersonService::new(store().await, FixedEnricher);

  let err = svc.create("zzxq", "doe", "").await.unwrap_err();
  assert!(matches!(err, ServiceError::ClientNotFound(_)));

  let err = svc.select(PersonQuery::All { page: Page::default() }).await.unwrap_err();
  assert!(matches!(err, ServiceError::StorageNotFound(_)));
}

#[tokio::test]
async fn service_maps_store_errors() {
  let svc = PersonService::new(store().await, FixedEnricher);
  let p = svc.create("john", "doe", "").await.unwrap();

  let err = svc.update_by_id(p.id, PersonPatch::default()).await.unwrap_err();
  assert!(matches!(err, ServiceError::StorageNoNewValues(_)));

  let patch = PersonPatch { nationality: "USA".into(), ..Default::default() };
  let err = svc.update_by_id(p.id, patch).await.unwrap_err();
  assert!(matches!(err, ServiceError::StorageConstraintViolated(_)));

  let err = svc.delete_by_id(p.id + 1).await.unwrap_err();
  assert!(matches!(err, ServiceError::StorageNotFound(_)));
}
