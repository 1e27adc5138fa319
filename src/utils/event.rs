// Copyright © Senka
// SPDX-License-Identifier: Apache-2.0

use crate::errors::ProcessorError;
use crate::models::transaction::{Attribute, Event};

/// Value of the first attribute matching `key`.
///
/// Absence is an error here; extractors that treat absence as valid data
/// must guard with an event-existence check before calling.
pub fn first_attribute_value<'a>(
    attributes: &'a [Attribute],
    key: &str,
) -> Result<&'a str, ProcessorError> {
    attributes
        .iter()
        .find(|a| a.key == key)
        .map(|a| a.value.as_str())
        .ok_or_else(|| ProcessorError::MissingAttribute {
            key: key.to_string(),
        })
}

/// Values of every attribute matching `key`, in original order. Repeated
/// keys are positionally significant (e.g. the paired `amount` entries of a
/// CDP repay), so order is never altered.
pub fn attribute_values<'a>(attributes: &'a [Attribute], key: &str) -> Vec<&'a str> {
    attributes
        .iter()
        .filter(|a| a.key == key)
        .map(|a| a.value.as_str())
        .collect()
}

/// First event of the given type, if any.
pub fn first_event_of_type<'a>(events: &'a [Event], event_type: &str) -> Option<&'a Event> {
    events.iter().find(|e| e.event_type == event_type)
}

/// Every event whose type is in `event_types`, in original order. Returns
/// `None` (not an empty vector) when nothing matches; callers branch on
/// presence before indexing.
pub fn events_of_types<'a>(events: &'a [Event], event_types: &[&str]) -> Option<Vec<&'a Event>> {
    let matched: Vec<&Event> = events
        .iter()
        .filter(|e| event_types.contains(&e.event_type.as_str()))
        .collect();
    if matched.is_empty() {
        None
    } else {
        Some(matched)
    }
}
