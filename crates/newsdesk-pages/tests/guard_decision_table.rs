//! Decision-table and property tests for the navigation guard.

use newsdesk_pages::router::{
	Decision, NavigationGuard, NavigationRequest, RouteDefinition, RouteTable,
};
use newsdesk_pages::storage::{
	CredentialStore, MemoryStore, RESET_CREATE_POST_FORM_KEY, StorageError, USER_KEY,
};
use proptest::prelude::*;
use rstest::*;

const MESSAGE: &str = "Please log in to view full articles";

fn news_guard() -> NavigationGuard {
	NavigationGuard::new("Login", MESSAGE).with_reset_form_route("Create")
}

fn news_table() -> RouteTable {
	RouteTable::builder()
		.route(RouteDefinition::new("home", "/home"))
		.route(RouteDefinition::new("Create", "/create"))
		.route(RouteDefinition::new("Post", "/post/:id").requires_auth())
		.route(RouteDefinition::new("Login", "/login"))
		.build()
		.unwrap()
}

#[fixture]
fn guard() -> NavigationGuard {
	news_guard()
}

#[fixture]
fn table() -> RouteTable {
	news_table()
}

/// Store whose writes always fail, like a full browser quota.
struct ReadOnlyStore {
	inner: MemoryStore,
}

impl CredentialStore for ReadOnlyStore {
	fn get(&self, key: &str) -> Option<String> {
		self.inner.get(key)
	}

	fn set(&self, key: &str, _value: &str) -> Result<(), StorageError> {
		Err(StorageError::Write {
			key: key.to_string(),
			message: "quota exceeded".to_string(),
		})
	}

	fn remove(&self, key: &str) -> Result<(), StorageError> {
		self.set(key, "")
	}
}

#[rstest]
#[case("home", false, true, "Public route, anonymous")]
#[case("home", true, true, "Public route, logged in")]
#[case("Create", false, true, "Create route, anonymous")]
#[case("Create", true, true, "Create route, logged in")]
#[case("Post", true, true, "Protected route, logged in")]
#[case("Post", false, false, "Protected route, anonymous")]
fn test_authorize_decision_table(
	guard: NavigationGuard,
	table: RouteTable,
	#[case] route: &str,
	#[case] credential_present: bool,
	#[case] expected_allowed: bool,
	#[case] desc: &str,
) {
	let target = table.get(route).unwrap();
	let request = NavigationRequest::new(target, "/requested");

	let decision = guard.authorize(&request, credential_present);

	assert_eq!(decision.is_allowed(), expected_allowed, "{}", desc);
}

#[rstest]
fn test_protected_redirect_keeps_query(guard: NavigationGuard, table: RouteTable) {
	let matched = table.resolve("/post/42?x=1").unwrap();
	let request = NavigationRequest::new(&matched.route, &matched.full_path);

	let decision = guard.authorize(&request, false);

	assert_eq!(
		decision,
		Decision::RedirectToLogin {
			return_path: "/post/42?x=1".to_string(),
			message: MESSAGE.to_string(),
		}
	);
}

#[rstest]
fn test_login_location(guard: NavigationGuard, table: RouteTable) {
	let decision = Decision::RedirectToLogin {
		return_path: "/post/42?x=1".to_string(),
		message: MESSAGE.to_string(),
	};

	let location = decision
		.login_location(&table, guard.login_route())
		.unwrap()
		.unwrap();

	assert_eq!(
		location,
		"/login?redirect=%2Fpost%2F42%3Fx%3D1&message=Please+log+in+to+view+full+articles"
	);
	assert_eq!(Decision::Allow.login_location(&table, "Login").unwrap(), None);
}

#[rstest]
fn test_login_location_escapes_return_path(guard: NavigationGuard, table: RouteTable) {
	let decision = Decision::RedirectToLogin {
		return_path: "/post/1?a=1&b=x y".to_string(),
		message: "50% & more".to_string(),
	};

	let location = decision
		.login_location(&table, guard.login_route())
		.unwrap()
		.unwrap();

	assert_eq!(
		location,
		"/login?redirect=%2Fpost%2F1%3Fa%3D1%26b%3Dx+y&message=50%25+%26+more"
	);
}

#[rstest]
#[case("", false)]
#[case("{}", true)]
#[case("alice", true)]
fn test_user_record_contents(
	guard: NavigationGuard,
	table: RouteTable,
	#[case] record: &str,
	#[case] expected_allowed: bool,
) {
	let store = MemoryStore::with_values([(USER_KEY, record)]);
	let post = table.get("Post").unwrap();

	let decision = guard.before_each(&NavigationRequest::new(post, "/post/42"), &store);

	assert_eq!(decision.is_allowed(), expected_allowed);
	if !expected_allowed {
		assert_eq!(
			decision,
			Decision::RedirectToLogin {
				return_path: "/post/42".to_string(),
				message: MESSAGE.to_string(),
			}
		);
	}
}

#[rstest]
#[case(false)]
#[case(true)]
fn test_reset_flag_independent_of_decision(
	guard: NavigationGuard,
	table: RouteTable,
	#[case] logged_in: bool,
) {
	let store = MemoryStore::new();
	if logged_in {
		store.set(USER_KEY, "{}").unwrap();
	}

	let create = table.get("Create").unwrap();
	let decision = guard.before_each(&NavigationRequest::new(create, "/create"), &store);

	assert!(decision.is_allowed());
	assert_eq!(store.get(RESET_CREATE_POST_FORM_KEY).as_deref(), Some("true"));
}

#[rstest]
fn test_reset_flag_on_redirected_navigation(table: RouteTable) {
	// The flag is raised even when the guard redirects
	let guard = NavigationGuard::new("Login", MESSAGE).with_reset_form_route("Post");
	let store = MemoryStore::new();

	let post = table.get("Post").unwrap();
	let decision = guard.before_each(&NavigationRequest::new(post, "/post/1"), &store);

	assert!(!decision.is_allowed());
	assert_eq!(store.get(RESET_CREATE_POST_FORM_KEY).as_deref(), Some("true"));
}

#[rstest]
fn test_failed_flag_write_does_not_block(guard: NavigationGuard, table: RouteTable) {
	let store = ReadOnlyStore {
		inner: MemoryStore::with_values([(USER_KEY, "{}")]),
	};

	let create = table.get("Create").unwrap();
	let decision = guard.before_each(&NavigationRequest::new(create, "/create"), &store);

	assert_eq!(decision, Decision::Allow);
	assert!(!store.has(RESET_CREATE_POST_FORM_KEY));
}

#[rstest]
fn test_origin_does_not_affect_decision(guard: NavigationGuard, table: RouteTable) {
	let post = table.get("Post").unwrap();
	let home = table.get("home").unwrap();

	let without = guard.authorize(&NavigationRequest::new(post, "/post/1"), false);
	let with = guard.authorize(
		&NavigationRequest::new(post, "/post/1").with_origin(Some(home)),
		false,
	);

	assert_eq!(without, with);
}

proptest! {
	/// Repeating the guard yields the same decision and the same store contents.
	#[test]
	fn prop_before_each_is_idempotent(
		route_index in 0usize..4,
		logged_in in any::<bool>(),
		id in "[a-z0-9]{1,8}",
		query in "[a-z]{0,5}",
		repeats in 1usize..5,
	) {
		let guard = news_guard();
		let table = news_table();
		let path = format!("/post/{}?q={}", id, query);

		let names = ["home", "Create", "Post", "Login"];
		let target = table.get(names[route_index]).unwrap();
		let request = NavigationRequest::new(target, &path);

		let store = MemoryStore::new();
		if logged_in {
			store.set(USER_KEY, "{}").unwrap();
		}

		let first = guard.before_each(&request, &store);
		let flag_after_first = store.get(RESET_CREATE_POST_FORM_KEY);
		let len_after_first = store.len();

		for _ in 0..repeats {
			prop_assert_eq!(guard.before_each(&request, &store), first.clone());
			prop_assert_eq!(store.get(RESET_CREATE_POST_FORM_KEY), flag_after_first.clone());
			prop_assert_eq!(store.len(), len_after_first);
		}

		prop_assert_eq!(first.is_allowed(), !target.is_protected() || logged_in);
	}
}
