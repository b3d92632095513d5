use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;

use biblio::drivers::{InMemoryConnector, ResultSetBuilder};
use biblio::{catalog, BiblioError, Connector, Gateway, ProcValue};

fn gateway_over(connector: &Arc<InMemoryConnector>) -> Gateway {
    Gateway::with_connector(
        Arc::clone(connector) as Arc<dyn Connector>,
        Duration::from_secs(5),
    )
}

#[tokio::test]
async fn invoke_concatenates_all_result_sets_in_emission_order() {
    let connector = Arc::new(InMemoryConnector::new().with_sets(vec![
        ResultSetBuilder::new()
            .columns(&["id", "name", "surname", "month", "year"])
            .row(&["1", "Ana", "Diaz", "3", "2024"])
            .row(&["2", "Luis", "Gomez", "3", "2024"])
            .build(),
        ResultSetBuilder::new()
            .columns(&["id", "name", "surname", "month", "year"])
            .row(&["3", "Eva", "Ruiz", "3", "2024"])
            .build(),
    ]));
    let gateway = gateway_over(&connector);

    let rows = gateway
        .invoke(&catalog::delinquent_list(3, 2024))
        .await
        .unwrap();

    assert_eq!(rows.len(), 3);
    assert_eq!(rows.rows()[0][1], "Ana");
    assert_eq!(rows.rows()[2][1], "Eva");
    connector.assert_last_call(
        "GenerateDelinquentList",
        &[ProcValue::Count(3), ProcValue::Count(2024)],
    );
}

#[tokio::test]
async fn invoke_records_the_exact_positional_parameters() {
    let connector = Arc::new(InMemoryConnector::new());
    let gateway = gateway_over(&connector);

    let admitted = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let call = catalog::create_user("12345678", "Ana", "Diaz", "a@x.com", "555", admitted);
    gateway.invoke(&call).await.unwrap();

    connector.assert_call_count(1);
    connector.assert_last_call(
        "CreateUser",
        &[
            ProcValue::Text("12345678".to_string()),
            ProcValue::Text("Ana".to_string()),
            ProcValue::Text("Diaz".to_string()),
            ProcValue::Text("a@x.com".to_string()),
            ProcValue::Text("555".to_string()),
            ProcValue::Date(admitted),
            ProcValue::Text("active".to_string()),
        ],
    );
}

#[tokio::test]
async fn failed_connect_issues_no_call_at_all() {
    let connector = Arc::new(InMemoryConnector::new().refusing_connections());
    let gateway = gateway_over(&connector);

    let err = gateway
        .invoke(&catalog::view_user(catalog::UserId(1)))
        .await
        .unwrap_err();
    assert!(matches!(err, BiblioError::ConnectionFailed(_)));

    let err = gateway
        .invoke_scalar(&catalog::average_months_owed())
        .await
        .unwrap_err();
    assert!(matches!(err, BiblioError::ConnectionFailed(_)));

    connector.assert_call_count(0);
    assert_eq!(connector.opened(), 0);
    assert_eq!(connector.closed(), 0);
}

#[tokio::test]
async fn connection_is_released_on_the_success_path() {
    let connector = Arc::new(InMemoryConnector::new().with_set(
        ResultSetBuilder::new().columns(&["id"]).row(&["1"]).build(),
    ));
    let gateway = gateway_over(&connector);

    gateway
        .invoke(&catalog::view_user(catalog::UserId(1)))
        .await
        .unwrap();

    assert_eq!(connector.opened(), 1);
    assert_eq!(connector.closed(), 1);
}

#[tokio::test]
async fn connection_is_released_when_the_call_fails() {
    let connector =
        Arc::new(InMemoryConnector::new().with_failure("user 7 still has active loans"));
    let gateway = gateway_over(&connector);

    let err = gateway
        .invoke(&catalog::delete_user(catalog::UserId(7)))
        .await
        .unwrap_err();

    match err {
        BiblioError::CallFailed { procedure, message } => {
            assert_eq!(procedure, "DeleteUser");
            assert_eq!(message, "user 7 still has active loans");
        }
        other => panic!("Expected CallFailed, got {other:?}"),
    }
    assert_eq!(connector.opened(), 1);
    assert_eq!(connector.closed(), 1);
}

#[tokio::test]
async fn each_invocation_gets_its_own_connection() {
    let connector = Arc::new(
        InMemoryConnector::new()
            .with_set(ResultSetBuilder::new().columns(&["id"]).row(&["1"]).build())
            .with_set(ResultSetBuilder::new().columns(&["id"]).row(&["1"]).build()),
    );
    let gateway = gateway_over(&connector);

    let first = gateway
        .invoke(&catalog::view_user(catalog::UserId(1)))
        .await
        .unwrap();
    let second = gateway
        .invoke(&catalog::view_user(catalog::UserId(1)))
        .await
        .unwrap();

    // Same request, no intervening mutation: identical rows both times.
    assert_eq!(first, second);
    assert_eq!(connector.opened(), 2);
    assert_eq!(connector.closed(), 2);
}

#[tokio::test]
async fn invoke_scalar_reads_one_value() {
    let connector = Arc::new(InMemoryConnector::new().with_scalar("0"));
    let gateway = gateway_over(&connector);

    let fine = gateway
        .invoke_scalar(&catalog::loan_fine(catalog::LoanId(12)))
        .await
        .unwrap();

    assert_eq!(fine.as_deref(), Some("0"));
    connector.assert_last_call("ComputeFine", &[ProcValue::Id(12)]);
    assert_eq!(connector.closed(), 1);
}

#[tokio::test]
async fn invoke_scalar_maps_missing_value_to_none() {
    let connector = Arc::new(InMemoryConnector::new());
    let gateway = gateway_over(&connector);

    let fine = gateway
        .invoke_scalar(&catalog::loan_fine(catalog::LoanId(99)))
        .await
        .unwrap();

    assert_eq!(fine, None);
}

#[tokio::test]
async fn unscripted_invocations_yield_empty_rows() {
    let connector = Arc::new(InMemoryConnector::new());
    let gateway = gateway_over(&connector);

    let rows = gateway
        .invoke(&catalog::search_books("dune"))
        .await
        .unwrap();

    assert!(rows.is_empty());
    connector.assert_last_call("SearchBooks", &[ProcValue::Text("dune".to_string())]);
}
