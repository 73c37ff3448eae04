// Collection and JSON object helpers
use serde_json::Value;
use std::collections::BTreeMap;

/// Null and empty string count as empty; everything else does not.
pub fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

pub fn clone_object(value: &Value) -> Value {
    value.clone()
}

/// Shallow merge of two JSON objects; keys from `right` win.
/// A non-object operand contributes nothing.
pub fn merge_objects(left: &Value, right: &Value) -> Value {
    let mut merged = match left {
        Value::Object(map) => map.clone(),
        _ => Default::default(),
    };
    if let Value::Object(map) = right {
        for (key, value) in map {
            merged.insert(key.clone(), value.clone());
        }
    }
    Value::Object(merged)
}

/// Stable in-place sort on an extracted key.
pub fn sort_by_property<T, K, F>(items: &mut [T], key: F, ascending: bool)
where
    K: PartialOrd,
    F: Fn(&T) -> K,
{
    items.sort_by(|a, b| {
        let ordering = key(a)
            .partial_cmp(&key(b))
            .unwrap_or(std::cmp::Ordering::Equal);
        if ascending { ordering } else { ordering.reverse() }
    });
}

pub fn filter_by_property<T, K, F>(items: &[T], key: F, value: &K) -> Vec<T>
where
    T: Clone,
    K: PartialEq,
    F: Fn(&T) -> K,
{
    items
        .iter()
        .filter(|item| key(item) == *value)
        .cloned()
        .collect()
}

pub fn group_by_property<T, K, F>(items: &[T], key: F) -> BTreeMap<K, Vec<T>>
where
    T: Clone,
    K: Ord,
    F: Fn(&T) -> K,
{
    let mut grouped: BTreeMap<K, Vec<T>> = BTreeMap::new();
    for item in items {
        grouped.entry(key(item)).or_default().push(item.clone());
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq)]
    struct Customer {
        id: u32,
        risk: &'static str,
        charge: f64,
    }

    fn customers() -> Vec<Customer> {
        vec![
            Customer { id: 1, risk: "High", charge: 95.0 },
            Customer { id: 2, risk: "Low", charge: 20.0 },
            Customer { id: 3, risk: "High", charge: 70.5 },
        ]
    }

    #[test]
    fn test_is_empty() {
        assert!(is_empty(&Value::Null));
        assert!(is_empty(&json!("")));
        assert!(!is_empty(&json!(0)));
        assert!(!is_empty(&json!(" ")));
    }

    #[test]
    fn test_merge_objects_right_wins() {
        let merged = merge_objects(&json!({"a": 1, "b": 2}), &json!({"b": 3, "c": 4}));
        assert_eq!(merged, json!({"a": 1, "b": 3, "c": 4}));
        assert_eq!(merge_objects(&json!(5), &json!({"x": 1})), json!({"x": 1}));
    }

    #[test]
    fn test_clone_object_is_deep() {
        let original = json!({"plan": {"tier": "basic"}, "tags": ["a"]});
        let mut copy = clone_object(&original);
        copy["plan"]["tier"] = json!("premium");
        copy["tags"][0] = json!("b");

        assert_eq!(original["plan"]["tier"], "basic");
        assert_eq!(original["tags"][0], "a");
    }

    #[test]
    fn test_sort_and_filter() {
        let mut list = customers();
        sort_by_property(&mut list, |c| c.charge, true);
        assert_eq!(list.iter().map(|c| c.id).collect::<Vec<_>>(), vec![2, 3, 1]);

        sort_by_property(&mut list, |c| c.charge, false);
        assert_eq!(list[0].id, 1);

        let high = filter_by_property(&list, |c| c.risk, &"High");
        assert_eq!(high.len(), 2);
    }

    #[test]
    fn test_group_by_property() {
        let grouped = group_by_property(&customers(), |c| c.risk);
        assert_eq!(grouped["High"].len(), 2);
        assert_eq!(grouped["Low"][0].id, 2);
    }
}
