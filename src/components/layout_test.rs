use super::*;
use crate::net::types::UserProfile;
use crate::routes::ROUTES;

fn route(path: &str) -> &'static RouteDescriptor {
    ROUTES.iter().find(|r| r.path == path).unwrap()
}

#[test]
fn nav_link_marks_only_current_route_active() {
    assert_eq!(nav_link_class(route("/task"), "/task"), "sidebar__link sidebar__link--active");
    assert_eq!(nav_link_class(route("/task"), "/task/"), "sidebar__link sidebar__link--active");
    assert_eq!(nav_link_class(route("/group"), "/task"), "sidebar__link");
}

#[test]
fn user_label_prefers_nickname_and_is_blank_without_profile() {
    let profile = UserProfile { username: "alice".to_owned(), nickname: "Alice".to_owned(), ..UserProfile::default() };
    assert_eq!(user_label(&Session::authenticated("t", profile)), "Alice");

    let plain = UserProfile { username: "bob".to_owned(), ..UserProfile::default() };
    assert_eq!(user_label(&Session::authenticated("t", plain)), "bob");

    assert_eq!(user_label(&Session::with_token("t")), "");
}
