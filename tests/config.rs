use amarra::config::{API_PORT, PROJECTS, WIDGET_PORT, endpoints};

#[test]
fn endpoint_urls() {
    assert_eq!(
        endpoints("example.com"),
        [
            "http://example.com/",
            "http://example.com/api/",
            "http://example.com/widget/",
        ]
    );
}

#[test]
fn fixed_backend_ports() {
    assert_eq!(API_PORT, 3000);
    assert_eq!(WIDGET_PORT, 3002);
}

#[test]
fn build_order_is_api_frontend_widget() {
    assert_eq!(PROJECTS, ["api", "frontend", "widget"]);
}
