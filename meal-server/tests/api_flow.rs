//! End-to-end HTTP flows against a temp data directory and a fixed clock

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use meal_server::utils::time::FixedClock;
use meal_server::{Config, ServerState, build_app};

struct TestApp {
    app: Router,
    clock: Arc<FixedClock>,
    _dir: tempfile::TempDir,
}

struct Reply {
    status: StatusCode,
    cookie: Option<String>,
    content_type: Option<String>,
    text: String,
}

impl Reply {
    fn json(&self) -> Value {
        serde_json::from_str(&self.text).unwrap()
    }
}

fn setup(now: &str) -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::with_overrides(dir.path(), 0);
    let clock = Arc::new(FixedClock::at(now).unwrap());
    let state = ServerState::with_clock(&config, clock.clone()).unwrap();
    let app = build_app(&state).with_state(state);
    TestApp {
        app,
        clock,
        _dir: dir,
    }
}

impl TestApp {
    async fn send(&self, method: &str, uri: &str, cookie: Option<&str>, body: Option<Value>) -> Reply {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let header_str = |name| {
            response
                .headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        let cookie = header_str(header::SET_COOKIE)
            .and_then(|v| v.split(';').next().map(str::to_string));
        let content_type = header_str(header::CONTENT_TYPE);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();

        Reply {
            status,
            cookie,
            content_type,
            text: String::from_utf8(bytes.to_vec()).unwrap(),
        }
    }

    async fn employee_login(&self, emp_id: &str) -> String {
        let reply = self
            .send(
                "POST",
                "/api/employee/login",
                None,
                Some(json!({ "empId": emp_id, "password": "1234" })),
            )
            .await;
        assert_eq!(reply.status, StatusCode::OK, "{}", reply.text);
        reply.cookie.unwrap()
    }

    async fn admin_login(&self) -> String {
        let reply = self
            .send(
                "POST",
                "/api/admin/login",
                None,
                Some(json!({ "account": "admin", "password": "1234" })),
            )
            .await;
        assert_eq!(reply.status, StatusCode::OK, "{}", reply.text);
        reply.cookie.unwrap()
    }
}

fn lunch(diet: &str) -> Value {
    json!({ "mealType": "LUNCH", "dietType": diet, "ricePortion": "FULL" })
}

#[tokio::test]
async fn test_health() {
    let app = setup("2024-01-10 08:00:00");
    let reply = app.send("GET", "/health", None, None).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.json()["today"], "2024-01-10");
}

#[tokio::test]
async fn test_employee_login_and_check_session() {
    let app = setup("2024-01-10 08:00:00");

    let bad = app
        .send(
            "POST",
            "/api/employee/login",
            None,
            Some(json!({ "empId": "93800", "password": "nope" })),
        )
        .await;
    assert_eq!(bad.status, StatusCode::UNAUTHORIZED);
    assert_eq!(bad.json()["success"], false);

    let anonymous = app.send("GET", "/api/check-session", None, None).await;
    assert_eq!(anonymous.json()["data"]["role"], "anonymous");

    // ID is normalized before lookup
    let cookie = app.employee_login(" 93800 ").await;
    assert!(cookie.starts_with("meal_session="));

    let session = app.send("GET", "/api/check-session", Some(&cookie), None).await;
    let data = &session.json()["data"];
    assert_eq!(data["role"], "employee");
    assert_eq!(data["empId"], "93800");
    assert_eq!(data["empName"], "林淑鈺");

    let logout = app.send("POST", "/api/employee/logout", Some(&cookie), None).await;
    assert_eq!(logout.status, StatusCode::OK);
    let after = app.send("GET", "/api/employee/today-orders", Some(&cookie), None).await;
    assert_eq!(after.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_route_gates() {
    let app = setup("2024-01-10 08:00:00");

    let no_session = app.send("GET", "/api/employee/today-orders", None, None).await;
    assert_eq!(no_session.status, StatusCode::UNAUTHORIZED);
    assert_eq!(no_session.json()["code"], 1001);

    let employee = app.employee_login("93800").await;
    let forbidden = app
        .send("GET", "/api/admin/departments", Some(&employee), None)
        .await;
    assert_eq!(forbidden.status, StatusCode::FORBIDDEN);

    let admin = app.admin_login().await;
    let as_admin = app
        .send("GET", "/api/employee/today-orders", Some(&admin), None)
        .await;
    assert_eq!(as_admin.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_order_before_cutoff_appears_in_report() {
    let app = setup("2024-01-10 08:00:00");
    let employee = app.employee_login("93800").await;

    let created = app
        .send("POST", "/api/employee/order", Some(&employee), Some(lunch("MEAT")))
        .await;
    assert_eq!(created.status, StatusCode::OK, "{}", created.text);
    assert_eq!(created.json()["data"]["orderTime"], "08:00:00");

    let today = app
        .send("GET", "/api/employee/today-orders", Some(&employee), None)
        .await
        .json();
    assert_eq!(today["data"]["lunch"]["dietType"], "MEAT");
    assert_eq!(today["data"]["lunchCutoff"], false);
    assert!(today["data"]["dinner"].is_null());

    let admin = app.admin_login().await;
    let report = app
        .send(
            "GET",
            "/api/admin/orders?dateFrom=2024-01-10&dateTo=2024-01-10&empId=93800",
            Some(&admin),
            None,
        )
        .await
        .json();
    assert_eq!(report["count"], 1);
    let record = &report["data"][0];
    assert_eq!(record["date"], "2024-01-10");
    assert_eq!(record["mealType"], "LUNCH");
    assert_eq!(record["dietType"], "MEAT");
    assert_eq!(record["ricePortion"], "FULL");
    assert_eq!(record["isOrdered"], true);
    assert_eq!(record["adminModified"], false);
}

#[tokio::test]
async fn test_cutoff_blocks_employee_but_not_admin() {
    let app = setup("2024-01-10 08:00:00");
    let employee = app.employee_login("93800").await;
    app.send("POST", "/api/employee/order", Some(&employee), Some(lunch("VEG")))
        .await;

    app.clock.set("2024-01-10T08:31:00".parse().unwrap());

    let late = app
        .send("POST", "/api/employee/order", Some(&employee), Some(lunch("MEAT")))
        .await;
    assert_eq!(late.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(late.json()["message"], "Lunch ordering has closed");

    let cancel = app
        .send(
            "POST",
            "/api/employee/cancel-order",
            Some(&employee),
            Some(json!({ "mealType": "LUNCH" })),
        )
        .await;
    assert_eq!(cancel.status, StatusCode::UNPROCESSABLE_ENTITY);

    let admin = app.admin_login().await;
    let mut body = lunch("MEAT");
    body["empId"] = json!("93800");
    let by_admin = app
        .send("POST", "/api/admin/orders", Some(&admin), Some(body))
        .await;
    assert_eq!(by_admin.status, StatusCode::OK, "{}", by_admin.text);
    assert_eq!(by_admin.json()["data"]["adminModified"], true);

    let cancelled = app
        .send(
            "POST",
            "/api/admin/orders/cancel",
            Some(&admin),
            Some(json!({ "empId": "93800", "mealType": "LUNCH", "date": "2024-01-10" })),
        )
        .await;
    assert_eq!(cancelled.status, StatusCode::OK);

    let again = app
        .send(
            "POST",
            "/api/admin/orders/cancel",
            Some(&admin),
            Some(json!({ "empId": "93800", "mealType": "LUNCH", "date": "2024-01-10" })),
        )
        .await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
    assert_eq!(again.json()["message"], "Order not found");
}

#[tokio::test]
async fn test_admin_update_order() {
    let app = setup("2024-01-10 07:00:00");
    let employee = app.employee_login("28109").await;
    app.send("POST", "/api/employee/order", Some(&employee), Some(lunch("MEAT")))
        .await;

    let admin = app.admin_login().await;
    let missing_fields = app
        .send(
            "PUT",
            "/api/admin/orders",
            Some(&admin),
            Some(json!({ "date": "2024-01-10", "empId": "28109", "mealType": "LUNCH" })),
        )
        .await;
    assert_eq!(missing_fields.status, StatusCode::BAD_REQUEST);

    let updated = app
        .send(
            "PUT",
            "/api/admin/orders",
            Some(&admin),
            Some(json!({
                "date": "2024-01-10",
                "empId": "28109",
                "mealType": "LUNCH",
                "dietType": "VEG",
                "ricePortion": "HALF"
            })),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK, "{}", updated.text);
    let data = &updated.json()["data"];
    assert_eq!(data["dietType"], "VEG");
    assert_eq!(data["ricePortion"], "HALF");
    assert_eq!(data["adminModified"], true);
    assert_eq!(data["orderTime"], "07:00:00");
}

#[tokio::test]
async fn test_weekly_orders_batch() {
    // Wednesday
    let app = setup("2024-01-10 09:00:00");
    let employee = app.employee_login("93800").await;

    let batch = app
        .send(
            "POST",
            "/api/employee/weekly-orders",
            Some(&employee),
            Some(json!({ "orders": [
                { "date": "2024-01-11", "mealType": "LUNCH", "dietType": "MEAT", "ricePortion": "FULL" },
                { "date": "2024-01-12", "mealType": "DINNER", "dietType": "VEG", "ricePortion": "HALF" },
                { "date": "2024-01-10", "mealType": "LUNCH", "dietType": "MEAT", "ricePortion": "FULL" }
            ]})),
        )
        .await;
    assert_eq!(batch.status, StatusCode::OK);
    let result = &batch.json()["data"];
    assert_eq!(result["processed"], 3);
    assert_eq!(result["successCount"], 2);
    assert_eq!(result["errorCount"], 1);
    assert_eq!(result["errors"][0], "2024-01-10 LUNCH: Lunch ordering has closed");

    let week = app
        .send("GET", "/api/employee/weekly-orders?weekType=current", Some(&employee), None)
        .await
        .json();
    let days = week["data"].as_object().unwrap();
    assert_eq!(days.len(), 5);
    assert_eq!(week["data"]["2024-01-11"]["LUNCH"]["dietType"], "MEAT");
    assert!(week["data"]["2024-01-11"]["DINNER"].is_null());
    assert_eq!(week["data"]["2024-01-12"]["DINNER"]["ricePortion"], "HALF");

    let bad = app
        .send("GET", "/api/employee/weekly-orders?weekType=fortnight", Some(&employee), None)
        .await;
    assert_eq!(bad.status, StatusCode::BAD_REQUEST);

    let history = app
        .send(
            "GET",
            "/api/employee/history?dateFrom=2024-01-01&dateTo=2024-01-31",
            Some(&employee),
            None,
        )
        .await
        .json();
    assert_eq!(history["count"], 2);
}

#[tokio::test]
async fn test_master_data_conflicts_and_delete() {
    let app = setup("2024-01-10 08:00:00");
    let admin = app.admin_login().await;

    let duplicate = app
        .send(
            "POST",
            "/api/admin/departments",
            Some(&admin),
            Some(json!({ "deptCode": "a10", "deptName": "Duplicate" })),
        )
        .await;
    assert_eq!(duplicate.status, StatusCode::CONFLICT);

    let created = app
        .send(
            "POST",
            "/api/admin/departments",
            Some(&admin),
            Some(json!({ "deptCode": "d40", "deptName": "品保部" })),
        )
        .await;
    assert_eq!(created.status, StatusCode::OK, "{}", created.text);
    let body = created.json();
    assert_eq!(body["message"], "Department created");
    assert_eq!(body["data"]["deptCode"], "D40");
    assert_eq!(body["data"]["id"], 4);

    let missing = app
        .send(
            "POST",
            "/api/admin/employees",
            Some(&admin),
            Some(json!({ "empId": "", "empName": "x", "password": "1", "deptCode": "A10" })),
        )
        .await;
    assert_eq!(missing.status, StatusCode::BAD_REQUEST);

    let window = app
        .send(
            "POST",
            "/api/admin/windows",
            Some(&admin),
            Some(json!({ "empId": "28109", "responsibleDeptCodes": ["B20"] })),
        )
        .await;
    assert_eq!(window.status, StatusCode::CONFLICT);

    // delete is idempotent
    for _ in 0..2 {
        let deleted = app
            .send("DELETE", "/api/admin/departments/4", Some(&admin), None)
            .await;
        assert_eq!(deleted.status, StatusCode::OK);
    }
    let list = app
        .send("GET", "/api/admin/departments", Some(&admin), None)
        .await
        .json();
    assert_eq!(list["count"], 3);
}

#[tokio::test]
async fn test_stats_and_export() {
    let app = setup("2024-01-10 08:00:00");
    let employee = app.employee_login("93800").await;
    app.send("POST", "/api/employee/order", Some(&employee), Some(lunch("MEAT")))
        .await;
    let admin = app.admin_login().await;

    let empty = app
        .send(
            "GET",
            "/api/admin/stats/employee-orders?dateFrom=2023-01-01&dateTo=2023-01-31",
            Some(&admin),
            None,
        )
        .await
        .json();
    let rows = empty["data"].as_array().unwrap();
    assert_eq!(rows.len(), 3);
    assert!(rows.iter().all(|r| r["totalCount"] == 0));

    let quantity = app
        .send(
            "GET",
            "/api/admin/stats/meal-quantity?dateFrom=2024-01-10&dateTo=2024-01-10",
            Some(&admin),
            None,
        )
        .await
        .json();
    assert_eq!(quantity["data"][0]["count"], 1);
    assert_eq!(quantity["data"][0]["dietType"], "MEAT");

    let bad_date = app
        .send(
            "GET",
            "/api/admin/stats/meal-quantity?dateFrom=2024-01-10&dateTo=tomorrow",
            Some(&admin),
            None,
        )
        .await;
    assert_eq!(bad_date.status, StatusCode::BAD_REQUEST);
    assert!(bad_date.json()["message"].as_str().unwrap().contains("tomorrow"));

    let csv = app
        .send(
            "GET",
            "/api/admin/orders/export?dateFrom=2024-01-10&dateTo=2024-01-10",
            Some(&admin),
            None,
        )
        .await;
    assert_eq!(csv.status, StatusCode::OK);
    assert!(csv.content_type.unwrap().starts_with("text/csv"));
    let lines: Vec<_> = csv.text.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("date,empId,empName"));
    assert!(lines[1].starts_with("2024-01-10,93800,林淑鈺,A10,LUNCH,MEAT,FULL,08:00:00"));
}
