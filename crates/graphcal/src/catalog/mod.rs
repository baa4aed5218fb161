//! The table of endpoint descriptors.
//!
//! The standard catalog is composed from resource families rather than
//! written out per path: the same event operations are generated for a user,
//! the primary calendar, a calendar by id, and a calendar inside a calendar
//! group.
//!
//! | Scope prefix                    | Path                                                                   |
//! |---------------------------------|------------------------------------------------------------------------|
//! | `user`                          | `/users/{user-id}`                                                     |
//! | `user_calendar`                 | `/users/{user-id}/calendar`                                            |
//! | `user_calendars`                | `/users/{user-id}/calendars/{calendar-id}`                             |
//! | `user_calendar_group_calendar`  | `/users/{user-id}/calendarGroups/{calendarGroup-id}/calendars/{calendar-id}` |
//!
//! Collection operations are named `{scope}_{verb}_{noun}`
//! (`user_calendar_get_event`); operations on a single event are named
//! `{scope}_event_{...}` or `{scope}_calendar_view_{...}`
//! (`user_event_dismiss_reminder`).

mod calendars;
mod events;
mod family;
mod fields;
mod odata;

use std::{collections::HashMap, sync::OnceLock};

use tracing::info;

use crate::{
    args::Arguments,
    descriptor::EndpointDescriptor,
    error::{Error, Result},
    request::{PreparedRequest, prepare},
};

use family::Scope;

/// An ordered set of uniquely named endpoints.
#[derive(Debug, Clone)]
pub struct Catalog {
    endpoints: Vec<EndpointDescriptor>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Builds a catalog, preserving the order of `endpoints`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateEndpoint`] if two descriptors share a name.
    pub fn new(endpoints: Vec<EndpointDescriptor>) -> Result<Self> {
        let mut index = HashMap::with_capacity(endpoints.len());
        for (position, endpoint) in endpoints.iter().enumerate() {
            if index.insert(endpoint.name.clone(), position).is_some() {
                return Err(Error::DuplicateEndpoint(endpoint.name.clone()));
            }
        }
        Ok(Self { endpoints, index })
    }

    /// The Outlook calendar surface of Microsoft Graph.
    ///
    /// # Panics
    ///
    /// Panics if the built-in table is malformed, which the catalog tests
    /// rule out.
    pub fn standard() -> &'static Self {
        static STANDARD: OnceLock<Catalog> = OnceLock::new();
        STANDARD.get_or_init(|| {
            let catalog = standard_endpoints()
                .and_then(Self::new)
                .expect("standard catalog is built from static, unique templates");
            info!(endpoints = catalog.len(), "Built endpoint catalog");
            catalog
        })
    }

    pub fn get(&self, name: &str) -> Option<&EndpointDescriptor> {
        self.index.get(name).map(|&position| &self.endpoints[position])
    }

    /// Looks up an endpoint by tool name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownEndpoint`] if no endpoint has that name.
    pub fn endpoint(&self, name: &str) -> Result<&EndpointDescriptor> {
        self.get(name).ok_or_else(|| Error::UnknownEndpoint(name.to_string()))
    }

    /// Builds the request for the endpoint named `name` against `base_url`
    /// without sending it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownEndpoint`] for an unknown name, otherwise the
    /// argument errors of [`prepare`].
    pub fn prepare(
        &self,
        name: &str,
        base_url: &str,
        args: &Arguments,
    ) -> Result<PreparedRequest> {
        prepare(self.endpoint(name)?, base_url, args)
    }

    pub fn iter(&self) -> impl Iterator<Item = &EndpointDescriptor> {
        self.endpoints.iter()
    }

    /// Endpoints carrying `tag`.
    pub fn with_tag<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a EndpointDescriptor> {
        self.endpoints
            .iter()
            .filter(move |endpoint| endpoint.tags.iter().any(|t| t == tag))
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a EndpointDescriptor;
    type IntoIter = std::slice::Iter<'a, EndpointDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.endpoints.iter()
    }
}

fn standard_endpoints() -> Result<Vec<EndpointDescriptor>> {
    let user = Scope::new("user", "/users/{user-id}", "a user");
    let primary = user.nest(
        "calendar",
        "/calendar",
        "the primary calendar of a user".to_string(),
    );
    let by_id = user.nest(
        "calendars",
        "/calendars/{calendar-id}",
        "a calendar of a user".to_string(),
    );
    let group = user.nest(
        "calendar_group",
        "/calendarGroups/{calendarGroup-id}",
        "a calendar group of a user".to_string(),
    );
    let group_member = group.nest(
        "calendar",
        "/calendars/{calendar-id}",
        "a calendar in a calendar group".to_string(),
    );

    let mut out = Vec::new();

    for scope in [&user, &primary, &by_id, &group_member] {
        events::event_container(scope, &mut out)?;
        events::calendar_view(scope, &mut out)?;
    }

    calendars::primary_calendar(&user, &mut out)?;
    calendars::calendar_collection(&user, &mut out)?;
    calendars::calendar_collection(&group, &mut out)?;
    calendars::calendar_groups(&user, &mut out)?;

    calendars::calendar_node(&primary, false, &mut out)?;
    calendars::calendar_node(&by_id, true, &mut out)?;
    calendars::calendar_node(&group_member, true, &mut out)?;

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{BodyMode, HttpMethod};

    #[test]
    fn test_prepare_by_name() {
        let catalog = Catalog::standard();
        let args = Arguments::new().with("user_id", "u1").with("event_id", "e1");

        let request = catalog
            .prepare("user_event_dismiss_reminder", "https://graph.example.test/v1.0", &args)
            .unwrap();
        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(
            request.url,
            "https://graph.example.test/v1.0/users/u1/events/e1/microsoft.graph.dismissReminder"
        );
        assert_eq!(request.body, None);

        let err = catalog
            .prepare("user_get_weather", "https://graph.example.test/v1.0", &args)
            .unwrap_err();
        assert!(matches!(err, Error::UnknownEndpoint(ref name) if name == "user_get_weather"));
    }

    #[test]
    fn test_standard_catalog_builds_with_unique_names() {
        let endpoints = standard_endpoints().unwrap();
        let total = endpoints.len();
        let catalog = Catalog::new(endpoints).unwrap();
        assert_eq!(catalog.len(), total);
        assert!(catalog.len() > 250, "only {} endpoints", catalog.len());
    }

    #[test]
    fn test_duplicate_names_are_rejected() {
        let event =
            EndpointDescriptor::new("user_get_event", HttpMethod::Get, "/users/{user-id}/events/{event-id}")
                .unwrap();
        let err = Catalog::new(vec![event.clone(), event]).unwrap_err();
        assert!(matches!(err, Error::DuplicateEndpoint(ref name) if name == "user_get_event"));
    }

    #[test]
    fn test_well_known_endpoints_have_expected_shapes() {
        let catalog = Catalog::standard();
        let cases = [
            (
                "user_calendar_get_event",
                HttpMethod::Get,
                "/users/{user-id}/calendar/events/{event-id}",
            ),
            (
                "user_event_dismiss_reminder",
                HttpMethod::Post,
                "/users/{user-id}/events/{event-id}/microsoft.graph.dismissReminder",
            ),
            (
                "user_calendar_delete_event",
                HttpMethod::Delete,
                "/users/{user-id}/calendar/events/{event-id}",
            ),
            (
                "user_calendars_list_calendar_view",
                HttpMethod::Get,
                "/users/{user-id}/calendars/{calendar-id}/calendarView",
            ),
            (
                "user_calendar_group_calendar_event_forward",
                HttpMethod::Post,
                "/users/{user-id}/calendarGroups/{calendarGroup-id}/calendars/{calendar-id}/events/{event-id}/microsoft.graph.forward",
            ),
            (
                "user_calendar_group_list_calendar",
                HttpMethod::Get,
                "/users/{user-id}/calendarGroups/{calendarGroup-id}/calendars",
            ),
            (
                "user_calendars_permanent_delete",
                HttpMethod::Post,
                "/users/{user-id}/calendars/{calendar-id}/microsoft.graph.permanentDelete",
            ),
            (
                "user_calendar_get_schedule",
                HttpMethod::Post,
                "/users/{user-id}/calendar/microsoft.graph.getSchedule",
            ),
            (
                "user_calendar_view_get_instance",
                HttpMethod::Get,
                "/users/{user-id}/calendarView/{event-id}/instances/{event-id1}",
            ),
            (
                "user_update_calendar_group",
                HttpMethod::Patch,
                "/users/{user-id}/calendarGroups/{calendarGroup-id}",
            ),
        ];

        for (name, method, path) in cases {
            let endpoint = catalog
                .get(name)
                .unwrap_or_else(|| panic!("missing {name}"));
            assert_eq!(endpoint.method, method, "{name}");
            assert_eq!(endpoint.path.as_str(), path, "{name}");
        }
    }

    #[test]
    fn test_bodies_only_on_mutating_methods() {
        for endpoint in Catalog::standard() {
            if matches!(endpoint.method, HttpMethod::Get | HttpMethod::Delete) {
                assert_eq!(endpoint.body, BodyMode::None, "{}", endpoint.name);
            }
            if endpoint.method == HttpMethod::Patch {
                assert!(
                    matches!(endpoint.body, BodyMode::Json(_)),
                    "{}",
                    endpoint.name
                );
            }
        }
    }

    #[test]
    fn test_every_endpoint_is_documented_and_tagged() {
        for endpoint in Catalog::standard() {
            assert!(!endpoint.summary.is_empty(), "{}", endpoint.name);
            assert!(!endpoint.tags.is_empty(), "{}", endpoint.name);
            assert!(endpoint.path.as_str().starts_with("/users/{user-id}"));
        }
    }

    #[test]
    fn test_argument_names_do_not_collide_within_an_endpoint() {
        for endpoint in Catalog::standard() {
            let mut names: Vec<&str> = endpoint
                .path_params()
                .map(|p| p.arg.as_str())
                .chain(endpoint.query.iter().map(|q| q.arg.as_str()))
                .chain(endpoint.body.fields().iter().map(|f| f.arg.as_str()))
                .collect();
            let total = names.len();
            names.sort_unstable();
            names.dedup();
            assert_eq!(names.len(), total, "{}", endpoint.name);
        }
    }

    #[test]
    fn test_with_tag_filters() {
        let catalog = Catalog::standard();
        assert!(catalog.with_tag("actions").all(|d| d.method == HttpMethod::Post));
        assert!(catalog.with_tag("permissions").count() > 0);
    }
}
