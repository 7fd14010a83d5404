use payroll_core::{
    Employee, EmployeeChanges, EmployeeRepository, EmployeeService, EmployeeValidationError,
    ErrorKind, Lookup, Money, NameMatch, RepoError, SqliteEmployeeRepository, Store, StoreConfig,
    MAX_CENTS,
};
use tempfile::TempDir;

#[test]
fn create_and_find_by_id_roundtrip() {
    let (_dir, store) = open_store();
    let repo = SqliteEmployeeRepository::new(store);

    let mut employee = dana().with_address("12 Elm Street");
    let id = repo.create_employee(&employee).unwrap();
    assert!(id > 0);
    employee.id = Some(id);

    let loaded = repo.find_by_id(id).unwrap().unwrap();
    assert_eq!(loaded, employee);
}

#[test]
fn create_assigns_distinct_ids() {
    let (_dir, store) = open_store();
    let repo = SqliteEmployeeRepository::new(store);

    let first = repo.create_employee(&dana()).unwrap();
    let second = repo
        .create_employee(&employee("Bob", "Lee", "222334444", 92_000))
        .unwrap();
    assert_ne!(first, second);
}

#[test]
fn duplicate_ssn_is_a_constraint_violation() {
    let (_dir, store) = open_store();
    let repo = SqliteEmployeeRepository::new(store);

    repo.create_employee(&dana()).unwrap();
    let err = repo
        .create_employee(&employee("Other", "Person", "444556777", 50_000))
        .unwrap_err();

    assert!(matches!(err, RepoError::ConstraintViolation(_)));
    assert_eq!(repo.list_all().unwrap().len(), 1);
}

#[test]
fn repository_does_not_reject_negative_salary() {
    let (_dir, store) = open_store();
    let repo = SqliteEmployeeRepository::new(store);

    let mut employee = dana();
    employee.salary = Money::from_cents(-100);
    let id = repo.create_employee(&employee).unwrap();

    let loaded = repo.find_by_id(id).unwrap().unwrap();
    assert_eq!(loaded.salary, Money::from_cents(-100));
}

#[test]
fn salary_beyond_storable_range_is_a_constraint_violation() {
    let (_dir, store) = open_store();
    let repo = SqliteEmployeeRepository::new(store);

    let mut employee = dana();
    employee.salary = Money::from_cents(MAX_CENTS + 1);
    let err = repo.create_employee(&employee).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ConstraintViolation);

    employee.salary = Money::from_cents(MAX_CENTS);
    assert!(repo.create_employee(&employee).is_ok());
}

#[test]
fn find_by_id_and_ssn_return_none_when_missing() {
    let (_dir, store) = open_store();
    let repo = SqliteEmployeeRepository::new(store);

    assert!(repo.find_by_id(42).unwrap().is_none());
    assert!(repo.find_by_ssn("999887777").unwrap().is_none());
}

#[test]
fn find_by_ssn_matches_exactly() {
    let (_dir, store) = open_store();
    let repo = SqliteEmployeeRepository::new(store);
    seed_sample_staff(&repo);

    let alice = repo.find_by_ssn("111223333").unwrap().unwrap();
    assert_eq!(alice.first_name, "Alice");
    assert!(repo.find_by_ssn("11122333").unwrap().is_none());
}

#[test]
fn name_fragment_matches_first_or_last_name_case_insensitively() {
    let (_dir, store) = open_store();
    let repo = SqliteEmployeeRepository::new(store);
    seed_sample_staff(&repo);

    let by_last = repo.find_by_name_fragment("lee").unwrap();
    assert_eq!(by_last.len(), 1);
    assert_eq!(by_last[0].first_name, "Bob");

    let by_first = repo.find_by_name_fragment("CAR").unwrap();
    assert_eq!(by_first.len(), 1);
    assert_eq!(by_first[0].last_name, "Smith");

    let both = names(&repo.find_by_name_fragment("o").unwrap());
    assert_eq!(both, vec!["Alice Johnson", "Bob Lee", "Carol Smith"]);
}

#[test]
fn name_fragment_can_be_case_sensitive() {
    let dir = tempfile::tempdir().unwrap();
    let config = StoreConfig::new(dir.path().join("payroll.db"))
        .with_name_match(NameMatch::CaseSensitive);
    let repo = SqliteEmployeeRepository::new(Store::open(config).unwrap());
    seed_sample_staff(&repo);

    assert!(repo.find_by_name_fragment("lee").unwrap().is_empty());
    assert_eq!(repo.find_by_name_fragment("Lee").unwrap().len(), 1);
}

#[test]
fn name_fragment_treats_wildcards_literally() {
    let (_dir, store) = open_store();
    let repo = SqliteEmployeeRepository::new(store);
    seed_sample_staff(&repo);
    repo.create_employee(&employee("Ann_Marie", "Lopez", "555667777", 61_000))
        .unwrap();

    assert!(repo.find_by_name_fragment("%").unwrap().is_empty());
    let underscored = repo.find_by_name_fragment("_").unwrap();
    assert_eq!(names(&underscored), vec!["Ann_Marie Lopez"]);
}

#[test]
fn case_insensitive_name_match_folds_ascii_only() {
    let (_dir, store) = open_store();
    let repo = SqliteEmployeeRepository::new(store);
    repo.create_employee(&employee("Émile", "Durand", "555667777", 61_000))
        .unwrap();

    assert!(repo.find_by_name_fragment("émile").unwrap().is_empty());
    assert_eq!(repo.find_by_name_fragment("Émile").unwrap().len(), 1);
    assert_eq!(repo.find_by_name_fragment("MILE").unwrap().len(), 1);
}

#[test]
fn name_fragment_without_matches_is_empty_not_error() {
    let (_dir, store) = open_store();
    let repo = SqliteEmployeeRepository::new(store);
    seed_sample_staff(&repo);

    assert!(repo.find_by_name_fragment("zzz").unwrap().is_empty());
}

#[test]
fn list_all_orders_by_last_then_first_name() {
    let (_dir, store) = open_store();
    let repo = SqliteEmployeeRepository::new(store);

    repo.create_employee(&employee("Zoe", "Adams", "100000001", 50_000))
        .unwrap();
    repo.create_employee(&employee("Carol", "Smith", "100000002", 50_000))
        .unwrap();
    repo.create_employee(&employee("Aaron", "Smith", "100000003", 50_000))
        .unwrap();
    repo.create_employee(&employee("Bob", "Baker", "100000004", 50_000))
        .unwrap();

    let listed = names(&repo.list_all().unwrap());
    assert_eq!(
        listed,
        vec!["Zoe Adams", "Bob Baker", "Aaron Smith", "Carol Smith"]
    );
}

#[test]
fn update_overwrites_every_mutable_column() {
    let (_dir, store) = open_store();
    let repo = SqliteEmployeeRepository::new(store);

    let id = repo.create_employee(&dana()).unwrap();
    let mut loaded = repo.find_by_id(id).unwrap().unwrap();
    loaded.last_name = "Black".to_string();
    loaded.salary = Money::from_units(50_000);
    loaded.address = Some("3 Oak Lane".to_string());
    loaded.is_full_time = false;

    assert!(repo.update_employee(&loaded).unwrap());

    let updated = repo.find_by_id(id).unwrap().unwrap();
    assert_eq!(updated, loaded);
}

#[test]
fn update_with_unknown_id_returns_false_and_changes_nothing() {
    let (_dir, store) = open_store();
    let repo = SqliteEmployeeRepository::new(store);
    seed_sample_staff(&repo);
    let before = repo.list_all().unwrap();

    let mut ghost = dana();
    ghost.id = Some(9_999);
    assert!(!repo.update_employee(&ghost).unwrap());

    let mut unsaved = dana();
    unsaved.id = None;
    assert!(!repo.update_employee(&unsaved).unwrap());

    assert_eq!(repo.list_all().unwrap(), before);
}

#[test]
fn update_to_duplicate_ssn_is_an_error() {
    let (_dir, store) = open_store();
    let repo = SqliteEmployeeRepository::new(store);
    seed_sample_staff(&repo);

    let mut bob = repo.find_by_ssn("222334444").unwrap().unwrap();
    bob.ssn = "111223333".to_string();
    let err = repo.update_employee(&bob).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ConstraintViolation);
}

#[test]
fn service_create_validates_and_stores_id_back() {
    let (_dir, store) = open_store();
    let service = EmployeeService::new(SqliteEmployeeRepository::new(store));

    let mut employee = dana();
    let id = service.create_employee(&mut employee).unwrap();
    assert_eq!(employee.id, Some(id));

    let mut invalid = employee_with_ssn("12-345");
    let err = service.create_employee(&mut invalid).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(EmployeeValidationError::InvalidSsn)
    ));
    assert_eq!(invalid.id, None);
    assert_eq!(service.list_employees().unwrap().len(), 1);
}

#[test]
fn service_require_maps_absence_to_not_found() {
    let (_dir, store) = open_store();
    let service = EmployeeService::new(SqliteEmployeeRepository::new(store));

    let err = service.require_employee(7).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(Lookup::EmployeeId(7))));
    assert_eq!(err.kind(), ErrorKind::NotFound);

    let err = service.require_employee_by_ssn("123456789").unwrap_err();
    assert!(!err.to_string().contains("123456789"));
}

#[test]
fn service_merge_update_keeps_unchanged_fields() {
    let (_dir, store) = open_store();
    let service = EmployeeService::new(SqliteEmployeeRepository::new(store));

    let mut employee = dana();
    let id = service.create_employee(&mut employee).unwrap();

    let changes = EmployeeChanges {
        last_name: Some("Black".to_string()),
        salary: Some(Money::from_units(50_000)),
        ..EmployeeChanges::default()
    };
    let written = service.merge_update(id, &changes).unwrap();

    let reloaded = service.require_employee(id).unwrap();
    assert_eq!(written, reloaded);
    assert_eq!(reloaded.first_name, "Dana");
    assert_eq!(reloaded.last_name, "Black");
    assert_eq!(reloaded.salary, Money::from_units(50_000));
}

#[test]
fn service_merge_update_of_unknown_id_is_not_found() {
    let (_dir, store) = open_store();
    let service = EmployeeService::new(SqliteEmployeeRepository::new(store));

    let err = service
        .merge_update(5, &EmployeeChanges::default())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn employee_serialization_uses_expected_wire_fields() {
    let mut employee = dana();
    employee.id = Some(3);

    let json = serde_json::to_value(&employee).unwrap();
    assert_eq!(json["id"], 3);
    assert_eq!(json["first_name"], "Dana");
    assert_eq!(json["salary"], "48000.00");
    assert_eq!(json["is_full_time"], true);
    assert!(json["address"].is_null());

    let decoded: Employee = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, employee);
}

#[test]
fn employee_deserialization_defaults_full_time() {
    let value = serde_json::json!({
        "first_name": "Eve",
        "last_name": "Stone",
        "ssn": "777889999",
        "job_title": "Analyst",
        "division": "Finance",
        "salary": 61000
    });

    let decoded: Employee = serde_json::from_value(value).unwrap();
    assert_eq!(decoded.id, None);
    assert!(decoded.is_full_time);
    assert_eq!(decoded.salary, Money::from_units(61_000));
}

fn open_store() -> (TempDir, Store) {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::open(StoreConfig::new(dir.path().join("payroll.db"))).unwrap();
    (dir, store)
}

fn employee(first: &str, last: &str, ssn: &str, salary_units: i64) -> Employee {
    Employee::new(
        first,
        last,
        ssn,
        "Software Engineer",
        "Engineering",
        Money::from_units(salary_units),
    )
}

fn employee_with_ssn(ssn: &str) -> Employee {
    employee("Frank", "Moss", ssn, 40_000)
}

fn dana() -> Employee {
    Employee::new(
        "Dana",
        "White",
        "444556777",
        "HR Generalist",
        "HR",
        Money::from_units(48_000),
    )
}

fn seed_sample_staff(repo: &SqliteEmployeeRepository) {
    repo.create_employee(&employee("Alice", "Johnson", "111223333", 75_000))
        .unwrap();
    repo.create_employee(&employee("Bob", "Lee", "222334444", 92_000))
        .unwrap();
    repo.create_employee(&Employee::new(
        "Carol",
        "Smith",
        "333445555",
        "QA Analyst",
        "Quality",
        Money::from_units(54_000),
    ))
    .unwrap();
}

fn names(employees: &[Employee]) -> Vec<String> {
    employees.iter().map(Employee::full_name).collect()
}
