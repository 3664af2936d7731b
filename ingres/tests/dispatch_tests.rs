use ingres::models::{Location, Scheme, Status};
use ingres::wris::endpoints;
use ingres::{IngresClient, IngresConfig, IngresError};
use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> IngresClient {
    IngresClient::with_config(IngresConfig::new().with_base_url(server.uri()).with_timeout(5))
        .expect("client should build")
}

async fn serve_json(server: &MockServer, body: Value) {
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

fn rainfall_body(values: &[f64]) -> Value {
    let content: Vec<Value> = values
        .iter()
        .map(|v| json!({"stationCode": "RF-01", "dataTime": "2024-01-01", "dataValue": v}))
        .collect();
    json!({"data": {"content": content, "totalElements": values.len()}})
}

#[tokio::test]
async fn every_registered_pair_issues_one_call_to_its_path() {
    let server = MockServer::start().await;
    serve_json(&server, json!({"statusCode": 200, "data": []})).await;
    let client = client_for(&server);

    let mut expected = 0;
    for scheme in [Scheme::Administrative, Scheme::Basin] {
        for data_type in endpoints::data_types(scheme) {
            let location = match scheme {
                Scheme::Administrative => Location::administrative("Maharashtra", "Pune"),
                Scheme::Basin => Location::basin("Krishna", "Bhima"),
            };
            let envelope = client.dispatch(data_type, location, None, None).await;
            assert!(envelope.is_success(), "{scheme} {data_type}");

            expected += 1;
            let requests = server.received_requests().await.unwrap();
            assert_eq!(requests.len(), expected);

            let resource_path = endpoints::resolve(scheme, data_type).unwrap();
            let last = requests.last().unwrap();
            assert_eq!(last.method.as_str(), "POST");
            assert_eq!(last.url.path(), format!("/{resource_path}"));
        }
    }
    assert_eq!(expected, 27);
}

#[tokio::test]
async fn unregistered_pairs_never_reach_the_network() {
    let server = MockServer::start().await;
    let client = client_for(&server);

    let cases = [
        ("ground_water_level", Location::basin("Ganga", "Yamuna")),
        ("sea_surface_temperature", Location::administrative("Kerala", "Kochi")),
        ("", Location::administrative("Kerala", "Kochi")),
    ];
    for (data_type, location) in cases {
        let envelope = client.dispatch(data_type, location, None, None).await;
        assert_eq!(envelope.status(), Status::Error);
        assert!(envelope.error_detail().unwrap().contains("Unknown data type"));
        assert!(envelope.statistics().is_none());
    }

    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn defaults_are_injected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/Dataset/RainFall"))
        .and(query_param("stateName", "Maharashtra"))
        .and(query_param("districtName", "Pune"))
        .and(query_param("agencyName", "CWC"))
        .and(query_param("startdate", "2024-01-01"))
        .and(query_param("enddate", "2024-01-05"))
        .respond_with(ResponseTemplate::new(200).set_body_json(rainfall_body(&[1.0, 2.0])))
        .expect(1)
        .mount(&server)
        .await;

    let envelope = client_for(&server)
        .dispatch("rainfall", Location::administrative("Maharashtra", "Pune"), None, None)
        .await;

    assert!(envelope.is_success());
}

#[tokio::test]
async fn blank_agency_falls_back_to_default() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(query_param("agencyName", "CWC"))
        .respond_with(ResponseTemplate::new(200).set_body_json(rainfall_body(&[])))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server)
        .dispatch("temperature", Location::administrative("Gujarat", "Rajkot"), Some("  "), None)
        .await;
}

#[tokio::test]
async fn success_is_enriched_with_summary_statistics_and_category() {
    let server = MockServer::start().await;
    serve_json(&server, rainfall_body(&[10.0, 20.0, 30.0])).await;

    let envelope = client_for(&server)
        .dispatch("rainfall", Location::administrative("Maharashtra", "Pune"), None, None)
        .await;

    assert_eq!(envelope.status(), Status::Success);
    assert_eq!(envelope.record_count(), 3);
    assert_eq!(
        envelope.summary(),
        Some("Retrieved rainfall data for Pune, Maharashtra. Total records: 3.")
    );

    let stats = envelope.statistics().unwrap();
    assert_eq!(stats.field, "dataValue");
    assert_eq!(stats.mean, 20.0);
    assert_eq!(stats.min, 10.0);
    assert_eq!(stats.max, 30.0);
    assert_eq!(stats.count, 3);
    assert_eq!(envelope.category(), Some("Low"));
}

#[tokio::test]
async fn rainfall_buckets_follow_the_mean() {
    for (values, label) in [
        (vec![5.0], "Very Low"),
        (vec![24.9], "Low"),
        (vec![60.0, 70.0], "Heavy"),
        (vec![200.0], "Very Heavy"),
    ] {
        let server = MockServer::start().await;
        serve_json(&server, rainfall_body(&values)).await;

        let envelope = client_for(&server)
            .dispatch("rainfall", Location::basin("Krishna", "Bhima"), None, None)
            .await;

        assert_eq!(envelope.category(), Some(label), "{values:?}");
    }
}

#[tokio::test]
async fn other_data_types_carry_no_category() {
    let server = MockServer::start().await;
    serve_json(&server, rainfall_body(&[300.0])).await;

    let envelope = client_for(&server)
        .dispatch("river_water_discharge", Location::basin("Krishna", "Bhima"), None, None)
        .await;

    assert!(envelope.statistics().is_some());
    assert!(envelope.category().is_none());
    assert_eq!(
        envelope.summary(),
        Some("Retrieved river water discharge data for Krishna basin, tributary Bhima. Total records: 1.")
    );
}

#[tokio::test]
async fn both_success_conventions_are_normalized() {
    let server = MockServer::start().await;
    serve_json(&server, json!({"statusCode": 200, "data": [{"x": 1}, {"x": 2}]})).await;
    let envelope = client_for(&server)
        .dispatch("soil_moisture", Location::basin("Mahanadi", "Hasdeo"), None, None)
        .await;
    assert_eq!(envelope.status(), Status::Success);
    assert_eq!(envelope.record_count(), 2);
    assert_eq!(envelope.statistics().unwrap().field, "x");

    let server = MockServer::start().await;
    serve_json(&server, json!({"data": {"content": [{"x": 1}], "totalElements": 1}})).await;
    let envelope = client_for(&server)
        .dispatch("soil_moisture", Location::administrative("Odisha", "Cuttack"), None, None)
        .await;
    assert_eq!(envelope.status(), Status::Success);
    assert_eq!(envelope.record_count(), 1);
}

#[tokio::test]
async fn empty_success_has_summary_but_no_statistics() {
    let server = MockServer::start().await;
    serve_json(&server, json!({"statusCode": 0, "message": "No records", "data": []})).await;

    let envelope = client_for(&server)
        .dispatch("snowfall", Location::basin("Indus", "Sutlej"), None, None)
        .await;

    assert!(envelope.is_success());
    assert_eq!(envelope.record_count(), 0);
    assert!(envelope.summary().unwrap().ends_with("Total records: 0."));
    assert!(envelope.statistics().is_none());
}

#[tokio::test]
async fn server_error_passes_through_untouched() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("server error"))
        .mount(&server)
        .await;

    let envelope = client_for(&server)
        .dispatch("rainfall", Location::administrative("Maharashtra", "Pune"), None, None)
        .await;

    assert_eq!(envelope.status(), Status::Error);
    let detail = envelope.error_detail().unwrap();
    assert!(detail.contains("500"));
    assert!(detail.contains("server error"));
    assert!(envelope.statistics().is_none());
    assert!(envelope.summary().is_none());
    assert!(envelope.category().is_none());

    let value = serde_json::to_value(&envelope).unwrap();
    assert!(value.get("statistics").is_none());
}

#[tokio::test]
async fn repeated_dispatch_is_idempotent() {
    let server = MockServer::start().await;
    serve_json(&server, rainfall_body(&[12.0, 18.0, 40.0])).await;
    let client = client_for(&server);

    let first = client
        .dispatch("rainfall", Location::administrative("Karnataka", "Belgaum"), None, None)
        .await;
    let second = client
        .dispatch("rainfall", Location::administrative("Karnataka", "Belgaum"), None, None)
        .await;

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_value(&first).unwrap(),
        serde_json::to_value(&second).unwrap()
    );
}

#[tokio::test]
async fn call_tool_maps_keyword_arguments() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/Dataset/Basin/River%20WaterLevel"))
        .and(query_param("basinName", "Narmada"))
        .and(query_param("tributaryName", "Tawa"))
        .and(query_param("agencyName", "NWDA"))
        .and(query_param("startdate", "2023-07-01"))
        .and(query_param("enddate", "2024-01-05"))
        .respond_with(ResponseTemplate::new(200).set_body_json(rainfall_body(&[301.2])))
        .expect(1)
        .mount(&server)
        .await;

    let envelope = client_for(&server)
        .call_tool(
            "get_basin_river_water_level_data",
            json!({
                "basin_name": "Narmada",
                "tributary_name": "Tawa",
                "agency_name": "NWDA",
                "start_date": "2023-07-01"
            }),
        )
        .await
        .unwrap();

    assert!(envelope.is_success());
    let stats = envelope.statistics().unwrap();
    assert_eq!(stats.count, 1);
    assert_eq!(stats.std_dev, None);
}

#[tokio::test]
async fn call_tool_rejects_bad_dates_without_a_request() {
    let server = MockServer::start().await;
    let client = client_for(&server);

    let envelope = client
        .call_tool(
            "get_rainfall_data",
            json!({"state_name": "Bihar", "district_name": "Patna", "start_date": "yesterday"}),
        )
        .await
        .unwrap();
    assert_eq!(envelope.status(), Status::Error);
    assert!(envelope.error_detail().unwrap().contains("start_date"));

    let envelope = client
        .call_tool(
            "get_rainfall_data",
            json!({"state_name": "Bihar", "district_name": "Patna", "start_date": "2024-03-01"}),
        )
        .await
        .unwrap();
    assert_eq!(envelope.status(), Status::Error);
    assert!(envelope.error_detail().unwrap().contains("after end date"));

    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn call_tool_reports_unknown_tools_and_missing_arguments() {
    let server = MockServer::start().await;
    let client = client_for(&server);

    let err = client
        .call_tool("get_basin_ground_water_level_data", json!({}))
        .await
        .unwrap_err();
    assert!(matches!(err, IngresError::UnknownTool { .. }));

    let err = client
        .call_tool("get_temperature_data", json!({"state_name": "Goa"}))
        .await
        .unwrap_err();
    assert!(matches!(err, IngresError::ValidationError { .. }));

    let err = client
        .call_tool("get_temperature_data", json!({"state_name": 5}))
        .await
        .unwrap_err();
    assert!(matches!(err, IngresError::ValidationError { .. }));
}
