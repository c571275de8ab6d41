use serde_json::{Map, Value};

pub const NAME: &str = "Name";
pub const EMAIL: &str = "Email";
pub const COLLEGE_NAME: &str = "CollegeName";
pub const LOCATION: &str = "Location";

pub const REQUIRED: &[&str] = &[NAME, EMAIL, COLLEGE_NAME, LOCATION];

/// `null`, `false`, zero and the empty string count as absent.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Names of required fields that are missing or falsy, in declaration order.
pub fn missing_required(fields: &Map<String, Value>) -> Vec<&'static str> {
    REQUIRED
        .iter()
        .copied()
        .filter(|name| !fields.get(*name).is_some_and(is_truthy))
        .collect()
}

/// Insert a field. Bracketed names nest (`a[b]=c` becomes `{"a":{"b":"c"}}`, `a[]=x`
/// appends to an array) and repeated names become an array of their values.
pub fn insert(fields: &mut Map<String, Value>, name: String, value: Value) {
    let Some((root, path)) = split_key(&name) else {
        insert_flat(fields, name, value);
        return;
    };

    let value = match fields.get_mut(root) {
        Some(slot) => match insert_at(slot, &path, value) {
            Ok(()) => return,
            Err(value) => value,
        },
        None => {
            let mut slot = Value::Null;
            match insert_at(&mut slot, &path, value) {
                Ok(()) => {
                    fields.insert(root.to_string(), slot);
                    return;
                }
                Err(value) => value,
            }
        }
    };

    // Clashes with a plain value already under the root: keep the literal name.
    insert_flat(fields, name, value);
}

fn insert_flat(fields: &mut Map<String, Value>, name: String, value: Value) {
    match fields.get_mut(&name) {
        Some(Value::Array(values)) => values.push(value),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, value]);
        }
        None => {
            fields.insert(name, value);
        }
    }
}

/// `a[b][]` -> `("a", ["b", ""])`. `None` for names without a well-formed bracket suffix.
fn split_key(name: &str) -> Option<(&str, Vec<&str>)> {
    let open = name.find('[')?;
    let (root, mut rest) = name.split_at(open);
    if root.is_empty() {
        return None;
    }

    let mut path = Vec::new();
    while !rest.is_empty() {
        let inner = rest.strip_prefix('[')?;
        let close = inner.find(']')?;
        path.push(&inner[..close]);
        rest = &inner[close + 1..];
    }
    Some((root, path))
}

fn is_index(segment: &str) -> bool {
    segment.bytes().all(|b| b.is_ascii_digit())
}

/// Place `value` under `path` inside `slot`. Gives the value back, untouched, on a type clash.
fn insert_at(slot: &mut Value, path: &[&str], value: Value) -> Result<(), Value> {
    let Some((head, rest)) = path.split_first() else {
        if slot.is_null() {
            *slot = value;
            return Ok(());
        }
        match slot {
            Value::Array(items) => items.push(value),
            Value::Object(_) => return Err(value),
            existing => {
                let first = existing.take();
                *existing = Value::Array(vec![first, value]);
            }
        }
        return Ok(());
    };

    if slot.is_null() {
        *slot = if is_index(head) {
            Value::Array(Vec::new())
        } else {
            Value::Object(Map::new())
        };
    }

    match slot {
        Value::Array(items) if is_index(head) => {
            let existing = head.parse::<usize>().ok().filter(|i| *i < items.len());
            match existing {
                Some(i) => insert_at(&mut items[i], rest, value),
                None => {
                    let mut child = Value::Null;
                    insert_at(&mut child, rest, value)?;
                    items.push(child);
                    Ok(())
                }
            }
        }
        Value::Object(map) if !head.is_empty() => match map.get_mut(*head) {
            Some(child) => insert_at(child, rest, value),
            None => {
                let mut child = Value::Null;
                insert_at(&mut child, rest, value)?;
                map.insert(head.to_string(), child);
                Ok(())
            }
        },
        _ => Err(value),
    }
}
