use axum::http::Method;

use crate::db::types::UserRole;

/// Access rule for a route group, in the order the gate applies them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AccessRule {
    PermitAll,
    Authenticated,
    Roles(&'static [UserRole]),
}

pub(crate) struct PolicyRule {
    method: Option<&'static str>,
    pattern: &'static str,
    rule: AccessRule,
}

const STAFF: &[UserRole] = &[UserRole::Admin, UserRole::Teacher];
const STUDENTS: &[UserRole] = &[UserRole::Student];
const ANY_ROLE: &[UserRole] = &[UserRole::Student, UserRole::Admin, UserRole::Teacher];

/// Ordered route policy; the first matching row decides. Method-specific rows
/// sit above their prefix rows so the overrides win.
const ROUTE_POLICY: &[PolicyRule] = &[
    PolicyRule { method: Some("GET"), pattern: "/", rule: AccessRule::PermitAll },
    PolicyRule { method: None, pattern: "/healthz", rule: AccessRule::PermitAll },
    PolicyRule { method: Some("GET"), pattern: "/metrics", rule: AccessRule::PermitAll },
    PolicyRule { method: Some("POST"), pattern: "/api/auth/register", rule: AccessRule::PermitAll },
    PolicyRule { method: Some("POST"), pattern: "/api/auth/login", rule: AccessRule::PermitAll },
    PolicyRule { method: Some("GET"), pattern: "/api/quiz/topics", rule: AccessRule::PermitAll },
    PolicyRule { method: Some("POST"), pattern: "/api/chatbot/message", rule: AccessRule::PermitAll },
    PolicyRule { method: None, pattern: "/swagger-*/**", rule: AccessRule::PermitAll },
    PolicyRule { method: None, pattern: "/v3/api-docs/**", rule: AccessRule::PermitAll },
    PolicyRule { method: None, pattern: "/api/admin/**", rule: AccessRule::Roles(STAFF) },
    PolicyRule {
        method: Some("GET"),
        pattern: "/api/quiz/history/*",
        rule: AccessRule::Roles(ANY_ROLE),
    },
    PolicyRule { method: None, pattern: "/api/quiz/**", rule: AccessRule::Roles(STUDENTS) },
    PolicyRule {
        method: Some("POST"),
        pattern: "/api/analysis/refresh",
        rule: AccessRule::Roles(STAFF),
    },
    PolicyRule {
        method: Some("GET"),
        pattern: "/api/analysis/*",
        rule: AccessRule::Roles(ANY_ROLE),
    },
    PolicyRule { method: None, pattern: "/api/analysis/**", rule: AccessRule::Roles(STUDENTS) },
    PolicyRule {
        method: Some("GET"),
        pattern: "/api/recommendations/topic/*",
        rule: AccessRule::Roles(ANY_ROLE),
    },
    PolicyRule {
        method: None,
        pattern: "/api/recommendations/**",
        rule: AccessRule::Roles(STUDENTS),
    },
    PolicyRule { method: None, pattern: "/api/topics/**", rule: AccessRule::Authenticated },
    PolicyRule { method: None, pattern: "/**", rule: AccessRule::Authenticated },
];

pub(crate) fn decide(method: &Method, path: &str) -> AccessRule {
    ROUTE_POLICY
        .iter()
        .find(|row| {
            row.method.map_or(true, |allowed| allowed == method.as_str())
                && path_matches(row.pattern, path)
        })
        .map(|row| row.rule)
        .unwrap_or(AccessRule::Authenticated)
}

pub(crate) fn rule_allows(rule: AccessRule, role: UserRole) -> bool {
    match rule {
        AccessRule::PermitAll | AccessRule::Authenticated => true,
        AccessRule::Roles(allowed) => allowed.contains(&role),
    }
}

/// Segment-wise glob match. `*` spans within one segment, a trailing `**`
/// spans zero or more whole segments.
pub(crate) fn path_matches(pattern: &str, path: &str) -> bool {
    let pattern_segments: Vec<&str> = pattern.split('/').filter(|s| !s.is_empty()).collect();
    let path_segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    segments_match(&pattern_segments, &path_segments)
}

fn segments_match(pattern: &[&str], path: &[&str]) -> bool {
    match pattern.split_first() {
        None => path.is_empty(),
        Some((&"**", _)) => true,
        Some((first, rest)) => match path.split_first() {
            None => false,
            Some((segment, path_rest)) => {
                segment_matches(first, segment) && segments_match(rest, path_rest)
            }
        },
    }
}

fn segment_matches(pattern: &str, segment: &str) -> bool {
    if pattern == "*" {
        return true;
    }
    if let Some(prefix) = pattern.strip_suffix('*') {
        if !prefix.contains('*') {
            return segment.starts_with(prefix);
        }
    }
    pattern == segment
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glob_matches_single_and_multi_segments() {
        assert!(path_matches("/api/quiz/topics", "/api/quiz/topics"));
        assert!(path_matches("/api/quiz/history/*", "/api/quiz/history/u-1"));
        assert!(!path_matches("/api/quiz/history/*", "/api/quiz/history"));
        assert!(path_matches("/api/admin/**", "/api/admin"));
        assert!(path_matches("/api/admin/**", "/api/admin/subjects/extra"));
        assert!(path_matches("/swagger-*/**", "/swagger-ui"));
        assert!(path_matches("/swagger-*/**", "/swagger-ui/index.html"));
        assert!(!path_matches("/swagger-*/**", "/api/swagger-ui"));
        assert!(path_matches("/**", "/anything/at/all"));
        assert!(path_matches("/", "/"));
    }

    #[test]
    fn public_routes_permit_all() {
        assert_eq!(decide(&Method::POST, "/api/auth/register"), AccessRule::PermitAll);
        assert_eq!(decide(&Method::POST, "/api/auth/login"), AccessRule::PermitAll);
        assert_eq!(decide(&Method::GET, "/api/quiz/topics"), AccessRule::PermitAll);
        assert_eq!(decide(&Method::POST, "/api/chatbot/message"), AccessRule::PermitAll);
        assert_eq!(decide(&Method::GET, "/"), AccessRule::PermitAll);
    }

    #[test]
    fn admin_routes_require_staff() {
        let rule = decide(&Method::GET, "/api/admin/subjects");
        assert!(rule_allows(rule, UserRole::Admin));
        assert!(rule_allows(rule, UserRole::Teacher));
        assert!(!rule_allows(rule, UserRole::Student));
    }

    #[test]
    fn quiz_routes_require_student_except_history() {
        let submit = decide(&Method::POST, "/api/quiz/submit");
        assert!(rule_allows(submit, UserRole::Student));
        assert!(!rule_allows(submit, UserRole::Teacher));

        let history = decide(&Method::GET, "/api/quiz/history/u-1");
        assert!(rule_allows(history, UserRole::Student));
        assert!(rule_allows(history, UserRole::Teacher));
        assert!(rule_allows(history, UserRole::Admin));
    }

    #[test]
    fn analysis_refresh_is_staff_only() {
        let refresh = decide(&Method::POST, "/api/analysis/refresh");
        assert!(rule_allows(refresh, UserRole::Admin));
        assert!(!rule_allows(refresh, UserRole::Student));

        let read = decide(&Method::GET, "/api/analysis/u-1");
        assert!(rule_allows(read, UserRole::Student));
        assert!(rule_allows(read, UserRole::Teacher));
    }

    #[test]
    fn recommendations_topic_allows_staff_too() {
        let by_topic = decide(&Method::GET, "/api/recommendations/topic/t-1");
        assert!(rule_allows(by_topic, UserRole::Teacher));

        let for_user = decide(&Method::GET, "/api/recommendations/u-1");
        assert!(rule_allows(for_user, UserRole::Student));
        assert!(!rule_allows(for_user, UserRole::Teacher));
    }

    #[test]
    fn everything_else_requires_authentication() {
        assert_eq!(decide(&Method::GET, "/api/topics/t-1"), AccessRule::Authenticated);
        assert_eq!(decide(&Method::GET, "/api/auth/me"), AccessRule::Authenticated);
        assert_eq!(decide(&Method::GET, "/api/analytics/dashboard/u-1"), AccessRule::Authenticated);
        assert_eq!(decide(&Method::POST, "/api/notes"), AccessRule::Authenticated);
    }
}
