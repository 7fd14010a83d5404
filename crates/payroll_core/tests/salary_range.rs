use payroll_core::{
    Employee, EmployeeRepository, ErrorKind, Money, SalaryRangeAdjuster,
    SqliteEmployeeRepository, Store, StoreConfig,
};
use rust_decimal::Decimal;
use tempfile::TempDir;

#[test]
fn raise_applies_only_inside_half_open_range() {
    let (_dir, store) = open_store();
    let repo = SqliteEmployeeRepository::new(store.clone());
    seed_salaries(&repo);
    let adjuster = SalaryRangeAdjuster::new(store);

    let changed = adjuster
        .adjust_salary_by_range(
            percent("3.2"),
            Money::from_units(58_000),
            Money::from_units(105_000),
        )
        .unwrap();

    assert_eq!(changed, 3);
    assert_eq!(salary_of(&repo, "100000001"), "59856.00");
    assert_eq!(salary_of(&repo, "100000002"), "94944.00");
    assert_eq!(salary_of(&repo, "100000003"), "61920.00");
    assert_eq!(salary_of(&repo, "100000004"), "120000.00");
}

#[test]
fn invalid_percent_is_rejected_before_any_update() {
    let (_dir, store) = open_store();
    let repo = SqliteEmployeeRepository::new(store.clone());
    seed_salaries(&repo);
    let before = repo.list_all().unwrap();
    let adjuster = SalaryRangeAdjuster::new(store);

    for rejected in ["-5", "0", "1000.01", "1.234"] {
        let err = adjuster
            .adjust_salary_by_range(percent(rejected), Money::ZERO, Money::from_units(1_000_000))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    assert_eq!(repo.list_all().unwrap(), before);
}

#[test]
fn range_without_matches_changes_nothing() {
    let (_dir, store) = open_store();
    let repo = SqliteEmployeeRepository::new(store.clone());
    seed_salaries(&repo);
    let adjuster = SalaryRangeAdjuster::new(store);

    let changed = adjuster
        .adjust_salary_by_range(
            percent("10"),
            Money::from_units(200_000),
            Money::from_units(300_000),
        )
        .unwrap();
    assert_eq!(changed, 0);

    let empty = adjuster
        .adjust_salary_by_range(percent("10"), Money::from_units(60_000), Money::from_units(60_000))
        .unwrap();
    assert_eq!(empty, 0);
    assert_eq!(salary_of(&repo, "100000003"), "60000.00");
}

#[test]
fn lower_bound_is_inclusive_and_upper_bound_exclusive() {
    let (_dir, store) = open_store();
    let repo = SqliteEmployeeRepository::new(store.clone());
    seed_salaries(&repo);
    let adjuster = SalaryRangeAdjuster::new(store);

    let changed = adjuster
        .adjust_salary_by_range(percent("10"), Money::from_units(60_000), Money::from_units(92_000))
        .unwrap();

    assert_eq!(changed, 1);
    assert_eq!(salary_of(&repo, "100000003"), "66000.00");
    assert_eq!(salary_of(&repo, "100000002"), "92000.00");
}

#[test]
fn raise_on_empty_store_returns_zero() {
    let (_dir, store) = open_store();
    let adjuster = SalaryRangeAdjuster::new(store);

    let changed = adjuster
        .adjust_salary_by_range(percent("5"), Money::ZERO, Money::from_units(1_000_000))
        .unwrap();
    assert_eq!(changed, 0);
}

#[test]
fn half_cent_results_round_away_from_zero() {
    let (_dir, store) = open_store();
    let repo = SqliteEmployeeRepository::new(store.clone());
    let positive = repo
        .create_employee(&employee("Erin", "Cole", "200000001", money("50005.00")))
        .unwrap();
    let negative = repo
        .create_employee(&employee("Fay", "Moss", "200000002", money("-50005.00")))
        .unwrap();
    let adjuster = SalaryRangeAdjuster::new(store);

    let changed = adjuster
        .adjust_salary_by_range(percent("1.1"), money("-60000"), money("60000"))
        .unwrap();

    assert_eq!(changed, 2);
    let raised = repo.find_by_id(positive).unwrap().unwrap();
    assert_eq!(raised.salary.to_string(), "50555.06");
    let lowered = repo.find_by_id(negative).unwrap().unwrap();
    assert_eq!(lowered.salary.to_string(), "-50555.06");
}

#[test]
fn raise_beyond_storable_range_fails_without_partial_update() {
    let (_dir, store) = open_store();
    let repo = SqliteEmployeeRepository::new(store.clone());
    seed_salaries(&repo);
    repo.create_employee(&employee("Gus", "Hale", "200000003", money("9000000000.00")))
        .unwrap();
    let before = repo.list_all().unwrap();
    let adjuster = SalaryRangeAdjuster::new(store);

    let err = adjuster
        .adjust_salary_by_range(percent("50"), Money::ZERO, money("9999999999.99"))
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::ConstraintViolation);
    assert_eq!(repo.list_all().unwrap(), before);
}

fn open_store() -> (TempDir, Store) {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::open(StoreConfig::new(dir.path().join("payroll.db"))).unwrap();
    (dir, store)
}

fn seed_salaries(repo: &SqliteEmployeeRepository) {
    let staff = [
        ("Alice", "Johnson", "100000001", 58_000),
        ("Bob", "Lee", "100000002", 92_000),
        ("Carol", "Smith", "100000003", 60_000),
        ("Dan", "Price", "100000004", 120_000),
    ];
    for (first, last, ssn, salary) in staff {
        repo.create_employee(&employee(first, last, ssn, Money::from_units(salary)))
            .unwrap();
    }
}

fn employee(first: &str, last: &str, ssn: &str, salary: Money) -> Employee {
    Employee::new(first, last, ssn, "Software Engineer", "Engineering", salary)
}

fn percent(value: &str) -> Decimal {
    value.parse().unwrap()
}

fn money(value: &str) -> Money {
    value.parse().unwrap()
}

fn salary_of(repo: &SqliteEmployeeRepository, ssn: &str) -> String {
    repo.find_by_ssn(ssn).unwrap().unwrap().salary.to_string()
}
