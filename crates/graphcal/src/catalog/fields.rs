//! Request body fields per Graph resource type and action.

use crate::descriptor::{BodyField, BodyMode, ValueKind};

fn field(arg: &str, kind: ValueKind, description: &str) -> BodyField {
    BodyField::new(arg, kind, description)
}

fn odata_type(example: &str) -> BodyField {
    field(
        "odata_type",
        ValueKind::String,
        &format!("OData type of the resource, e.g. {example}"),
    )
    .wire("@odata.type")
}

/// Writable properties of an `event`.
pub(super) fn event(creating: bool) -> BodyMode {
    let mut fields = vec![
        field("subject", ValueKind::String, "The text of the event's subject line"),
        field(
            "body",
            ValueKind::Object,
            "Message body: { contentType: text|html, content }",
        ),
        field(
            "start",
            ValueKind::Object,
            "Start date, time, and time zone: { dateTime, timeZone }",
        ),
        field(
            "end",
            ValueKind::Object,
            "End date, time, and time zone: { dateTime, timeZone }",
        ),
        field("location", ValueKind::Object, "The location of the event"),
        field("locations", ValueKind::ObjectList, "Locations where the event is held"),
        field("attendees", ValueKind::ObjectList, "The collection of attendees"),
        field("is_all_day", ValueKind::Boolean, "Whether the event lasts the entire day"),
        field("is_online_meeting", ValueKind::Boolean, "Whether the event has online meeting information"),
        field(
            "online_meeting_provider",
            ValueKind::String,
            "teamsForBusiness, skypeForBusiness, or skypeForConsumer",
        ),
        field("is_reminder_on", ValueKind::Boolean, "Whether an alert is set to remind the user"),
        field(
            "reminder_minutes_before_start",
            ValueKind::Integer,
            "Minutes before the start time that the reminder alert occurs",
        ),
        field("importance", ValueKind::String, "low, normal, or high"),
        field("sensitivity", ValueKind::String, "normal, personal, private, or confidential"),
        field(
            "show_as",
            ValueKind::String,
            "free, tentative, busy, oof, workingElsewhere, or unknown",
        ),
        field("categories", ValueKind::StringList, "Categories associated with the event"),
        field("recurrence", ValueKind::Object, "The recurrence pattern for the event"),
        field(
            "response_requested",
            ValueKind::Boolean,
            "Whether the organizer would like an invitee to send a response",
        ),
        field(
            "allow_new_time_proposals",
            ValueKind::Boolean,
            "Whether invitees can propose a new time",
        ),
        field("hide_attendees", ValueKind::Boolean, "Whether attendees see only themselves"),
    ];
    if creating {
        fields.push(field(
            "transaction_id",
            ValueKind::String,
            "Client identifier used to avoid redundant POST retries",
        ));
    }
    BodyMode::Json(fields)
}

/// Writable properties of a `calendar`.
pub(super) fn calendar() -> BodyMode {
    BodyMode::Json(vec![
        field("name", ValueKind::String, "The calendar name"),
        field("color", ValueKind::String, "Color theme, e.g. lightBlue or auto"),
        field("hex_color", ValueKind::String, "Color in #RRGGBB form"),
        field(
            "default_online_meeting_provider",
            ValueKind::String,
            "Default online meeting provider for meetings sent from this calendar",
        ),
        field(
            "allowed_online_meeting_providers",
            ValueKind::StringList,
            "Online meeting providers usable in this calendar",
        ),
        field(
            "is_tallying_responses",
            ValueKind::Boolean,
            "Whether this calendar supports tracking meeting responses",
        ),
    ])
}

/// Writable properties of a `calendarGroup`.
pub(super) fn calendar_group() -> BodyMode {
    BodyMode::Json(vec![
        field("name", ValueKind::String, "The group name"),
        field("class_id", ValueKind::String, "The class identifier"),
        field("change_key", ValueKind::String, "Version of the calendar group"),
    ])
}

/// Writable properties of a `calendarPermission`.
pub(super) fn calendar_permission(creating: bool) -> BodyMode {
    let role = field(
        "role",
        ValueKind::String,
        "none, freeBusyRead, limitedRead, read, write, delegateWithoutPrivateEventAccess, \
         delegateWithPrivateEventAccess, or custom",
    );
    if !creating {
        return BodyMode::Json(vec![role]);
    }
    BodyMode::Json(vec![
        field(
            "email_address",
            ValueKind::Object,
            "Sharee or delegate: { name, address }",
        ),
        role,
        field("allowed_roles", ValueKind::StringList, "Permission levels allowed for the sharee"),
        field("is_inside_organization", ValueKind::Boolean, "Whether the user is in the same organization"),
        field("is_removable", ValueKind::Boolean, "Whether the user can be removed from the list"),
    ])
}

/// Writable properties of an `attachment`.
pub(super) fn attachment() -> BodyMode {
    BodyMode::Json(vec![
        odata_type("#microsoft.graph.fileAttachment"),
        field("name", ValueKind::String, "The attachment's file name"),
        field("content_type", ValueKind::String, "The MIME type"),
        field("content_bytes", ValueKind::String, "Base64-encoded file contents"),
        field("content_id", ValueKind::String, "The ID of the attachment in the Exchange store"),
        field("is_inline", ValueKind::Boolean, "Whether the attachment is inline"),
        field("size", ValueKind::Integer, "Length of the attachment in bytes"),
    ])
}

/// Body of `attachments/createUploadSession`.
pub(super) fn upload_session() -> BodyMode {
    BodyMode::Json(vec![
        field(
            "attachment_item",
            ValueKind::Object,
            "File to upload: { attachmentType, name, size, contentType, isInline }",
        )
        .wire("AttachmentItem"),
    ])
}

/// Properties of an open extension. Custom properties are merged into the
/// top level of the body.
pub(super) fn extension() -> BodyMode {
    BodyMode::Json(vec![
        odata_type("microsoft.graph.openTypeExtension"),
        field("extension_name", ValueKind::String, "Unique text identifier of the extension"),
        field(
            "additional_properties",
            ValueKind::Object,
            "Custom properties stored on the extension",
        )
        .flatten(),
    ])
}

/// Body of `accept`, `decline`, and `tentativelyAccept`.
pub(super) fn meeting_response(proposes_time: bool) -> BodyMode {
    let mut fields = vec![
        field("comment", ValueKind::String, "Text included in the response"),
        field(
            "send_response",
            ValueKind::Boolean,
            "Whether a response is sent to the organizer",
        ),
    ];
    if proposes_time {
        fields.push(field(
            "proposed_new_time",
            ValueKind::Object,
            "Alternate time proposed to the organizer: { start, end }",
        ));
    }
    BodyMode::Json(fields)
}

/// Body of `cancel`.
pub(super) fn cancel() -> BodyMode {
    BodyMode::Json(vec![
        field("comment", ValueKind::String, "Cancellation message sent to attendees").wire("Comment"),
    ])
}

/// Body of `forward`.
pub(super) fn forward() -> BodyMode {
    BodyMode::Json(vec![
        field(
            "to_recipients",
            ValueKind::ObjectList,
            "Recipients: [{ emailAddress: { name, address } }]",
        )
        .wire("ToRecipients"),
        field("comment", ValueKind::String, "Comment included in the forward").wire("Comment"),
    ])
}

/// Body of `snoozeReminder`.
pub(super) fn snooze_reminder() -> BodyMode {
    BodyMode::Json(vec![
        field(
            "new_reminder_time",
            ValueKind::Object,
            "New reminder time: { dateTime, timeZone }",
        )
        .wire("NewReminderTime"),
    ])
}

/// Body of `getSchedule`.
pub(super) fn get_schedule() -> BodyMode {
    BodyMode::Json(vec![
        field(
            "schedules",
            ValueKind::StringList,
            "SMTP addresses of users, distribution lists, or resources",
        ),
        field("start_time", ValueKind::Object, "Start of the period: { dateTime, timeZone }"),
        field("end_time", ValueKind::Object, "End of the period: { dateTime, timeZone }"),
        field(
            "availability_view_interval",
            ValueKind::Integer,
            "Length of a time slot in availabilityView, in minutes (default 30)",
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wires(mode: &BodyMode) -> Vec<&str> {
        mode.fields().iter().map(|f| f.wire.as_str()).collect()
    }

    #[test]
    fn test_event_fields_are_camel_case() {
        let creating = event(true);
        let created = wires(&creating);
        assert!(created.contains(&"isAllDay"));
        assert!(created.contains(&"reminderMinutesBeforeStart"));
        assert!(created.contains(&"transactionId"));
        assert!(!wires(&event(false)).contains(&"transactionId"));
    }

    #[test]
    fn test_action_bodies_keep_graph_parameter_casing() {
        assert_eq!(wires(&forward()), ["ToRecipients", "Comment"]);
        assert_eq!(wires(&snooze_reminder()), ["NewReminderTime"]);
        assert_eq!(wires(&upload_session()), ["AttachmentItem"]);
        assert_eq!(
            wires(&meeting_response(true)),
            ["comment", "sendResponse", "proposedNewTime"]
        );
    }

    #[test]
    fn test_extension_custom_properties_are_flattened() {
        let mode = extension();
        let flattened: Vec<_> = mode.fields().iter().filter(|f| f.flatten).collect();
        assert_eq!(flattened.len(), 1);
        assert_eq!(flattened[0].arg, "additional_properties");
        assert_eq!(mode.fields()[0].wire, "@odata.type");
    }
}
