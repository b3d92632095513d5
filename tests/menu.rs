use std::sync::Arc;
use std::time::Duration;

use biblio::drivers::{InMemoryConnector, ResultSetBuilder};
use biblio::{Connector, Gateway, ProcValue, Session};

/// Feed a scripted keyboard session through the menu over the given backend
/// and return the rendered transcript.
async fn run_script(connector: &Arc<InMemoryConnector>, script: &str) -> String {
    let gateway = Gateway::with_connector(
        Arc::clone(connector) as Arc<dyn Connector>,
        Duration::from_secs(5),
    );
    let mut session = Session::new(gateway, script.as_bytes(), Vec::new());
    session.run().await.unwrap();
    String::from_utf8(session.into_output()).unwrap()
}

#[tokio::test]
async fn creating_a_user_forces_the_active_status() {
    let connector = Arc::new(InMemoryConnector::new());

    let output = run_script(
        &connector,
        "1\n1\n12345678\nAna\nDiaz\na@x.com\n555\n2024-01-01\n0\n0\n",
    )
    .await;

    assert!(output.contains("User created."));
    let call = connector.last_call().unwrap();
    assert_eq!(call.procedure, "CreateUser");
    assert_eq!(call.params.len(), 7);
    assert_eq!(call.params[0], ProcValue::Text("12345678".to_string()));
    assert_eq!(
        call.params.last(),
        Some(&ProcValue::Text("active".to_string()))
    );
}

#[tokio::test]
async fn viewing_a_user_prints_header_then_record() {
    let connector = Arc::new(
        InMemoryConnector::new().with_set(
            ResultSetBuilder::new()
                .columns(&["id", "dni", "name", "surname", "email", "phone", "admitted", "status"])
                .row(&["4", "12345678", "Ana", "Diaz", "a@x.com", "555", "2024-01-01", "active"])
                .build(),
        ),
    );

    let output = run_script(&connector, "1\n2\n4\n0\n0\n").await;

    connector.assert_last_call("ViewUser", &[ProcValue::Id(4)]);
    assert!(output.contains("id | dni | name | surname | email | phone | admitted | status"));
    assert!(output.contains("4 | 12345678 | Ana | Diaz | a@x.com | 555 | 2024-01-01 | active"));
}

#[tokio::test]
async fn viewing_a_missing_user_prints_not_found() {
    let connector = Arc::new(InMemoryConnector::new());

    let output = run_script(&connector, "1\n2\n999\n0\n0\n").await;

    assert!(output.contains("User not found."));
}

#[tokio::test]
async fn deleting_a_user_with_loans_reports_the_constraint_and_the_user_survives() {
    let connector = Arc::new(
        InMemoryConnector::new()
            .with_failure("user 4 still has active loans")
            .with_set(
                ResultSetBuilder::new()
                    .columns(&["id", "dni", "name"])
                    .row(&["4", "12345678", "Ana"])
                    .build(),
            ),
    );

    // Delete user 4, then view the same id again.
    let output = run_script(&connector, "1\n4\n4\n2\n4\n0\n0\n").await;

    assert!(output.contains("Error: Call to DeleteUser failed: user 4 still has active loans"));
    assert!(!output.contains("User deleted"));
    assert!(output.contains("4 | 12345678 | Ana"));

    let calls = connector.recorded_calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].procedure, "DeleteUser");
    assert_eq!(calls[1].procedure, "ViewUser");
}

#[tokio::test]
async fn an_on_time_return_has_a_zero_fine_with_two_decimals() {
    let connector = Arc::new(InMemoryConnector::new().with_scalar("0"));

    let output = run_script(&connector, "5\n12\n0\n").await;

    connector.assert_last_call("ComputeFine", &[ProcValue::Id(12)]);
    assert!(output.contains("The fine is: $0.00"));
}

#[tokio::test]
async fn an_empty_delinquent_list_renders_not_found() {
    let connector = Arc::new(InMemoryConnector::new());

    let output = run_script(&connector, "10\n3\n2024\n0\n").await;

    connector.assert_last_call(
        "GenerateDelinquentList",
        &[ProcValue::Count(3), ProcValue::Count(2024)],
    );
    assert!(output.contains("No delinquent users found."));
}

#[tokio::test]
async fn a_malformed_id_reprompts_the_same_field() {
    let connector = Arc::new(InMemoryConnector::new());

    let output = run_script(&connector, "1\n2\nabc\n4\n0\n0\n").await;

    assert!(output.contains("Enter a whole number."));
    connector.assert_last_call("ViewUser", &[ProcValue::Id(4)]);
}

#[tokio::test]
async fn a_refused_connection_prints_one_diagnostic_and_no_call_is_made() {
    let connector = Arc::new(InMemoryConnector::new().refusing_connections());

    let output = run_script(&connector, "9\nDune\n0\n").await;

    assert!(output.contains("Error: Connection failed"));
    assert!(output.contains("No books matched."));
    connector.assert_call_count(0);
}

#[tokio::test]
async fn the_average_report_renders_two_decimals() {
    let connector = Arc::new(InMemoryConnector::new().with_scalar("2.5"));

    let output = run_script(&connector, "11\n0\n").await;

    connector.assert_last_call("AverageMonthsOwed", &[]);
    assert!(output.contains("Average months owed: 2.50"));
}

#[tokio::test]
async fn viewing_twice_with_no_mutation_renders_identical_records() {
    let user_row = ResultSetBuilder::new()
        .columns(&["id", "dni", "name"])
        .row(&["4", "12345678", "Ana"])
        .build();
    let connector = Arc::new(
        InMemoryConnector::new()
            .with_set(user_row.clone())
            .with_set(user_row),
    );

    let output = run_script(&connector, "1\n2\n4\n2\n4\n0\n0\n").await;

    assert_eq!(output.matches("4 | 12345678 | Ana").count(), 2);
    connector.assert_call_count(2);
}

#[tokio::test]
async fn an_unknown_menu_option_redisplays_the_menu() {
    let connector = Arc::new(InMemoryConnector::new());

    let output = run_script(&connector, "99\n0\n").await;

    assert!(output.contains("Invalid option"));
    assert!(output.contains("Exiting."));
    connector.assert_call_count(0);
}

#[tokio::test]
async fn updating_the_fee_sends_month_year_and_amount() {
    let connector = Arc::new(InMemoryConnector::new());

    let output = run_script(&connector, "7\n3\n2024\n12.50\n0\n").await;

    connector.assert_last_call(
        "UpdateFee",
        &[
            ProcValue::Count(3),
            ProcValue::Count(2024),
            ProcValue::Money(12.5),
        ],
    );
    assert!(output.contains("Fee updated."));
}

#[tokio::test]
async fn registering_a_loan_confirms_after_dispatch() {
    let connector = Arc::new(InMemoryConnector::new());

    let output = run_script(&connector, "3\n4\n9\n2024-06-30\n0\n").await;

    let call = connector.last_call().unwrap();
    assert_eq!(call.procedure, "RegisterLoan");
    assert_eq!(call.params[0], ProcValue::Id(4));
    assert_eq!(call.params[1], ProcValue::Id(9));
    assert!(output.contains("Loan registered."));
}
