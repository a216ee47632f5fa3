use uhsapi::header::HeaderMap;

/// How explicit headers combine with default headers.
///
/// Defaults are always applied first, so within a name default values precede
/// explicit ones unless they were removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeaderMerge {
    /// An explicit header drops every value already present for its name,
    /// defaults included.
    #[default]
    Override,
    /// Explicit values are appended after the defaults.
    Aggregate,
}

impl HeaderMerge {
    pub fn apply(self, defaults: &HeaderMap, explicit: &HeaderMap, target: &mut HeaderMap) {
        for (name, values) in defaults.iter() {
            for value in values.iter() {
                target.append(name.clone(), value.clone());
            }
        }
        for (name, values) in explicit.iter() {
            if self == Self::Override {
                target.remove(name);
            }
            for value in values.iter() {
                target.append(name.clone(), value.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;
    use uhsapi::header::HeaderName;

    use super::*;

    fn x() -> HeaderName {
        HeaderName::from_static("X")
    }

    fn maps() -> (HeaderMap, HeaderMap) {
        let defaults = [(x(), "default")].into_iter().collect();
        let explicit = [(x(), "explicit")].into_iter().collect();
        (defaults, explicit)
    }

    #[test]
    fn override_replaces() {
        let (defaults, explicit) = maps();
        let mut target = HeaderMap::new();
        HeaderMerge::Override.apply(&defaults, &explicit, &mut target);
        assert_eq!(target.get_all(&x()), [Bytes::from("explicit")]);
    }

    #[test]
    fn aggregate_appends() {
        let (defaults, explicit) = maps();
        let mut target = HeaderMap::new();
        HeaderMerge::Aggregate.apply(&defaults, &explicit, &mut target);
        assert_eq!(
            target.get_all(&x()),
            [Bytes::from("default"), Bytes::from("explicit")]
        );
    }

    #[test]
    fn override_clears_existing_values() {
        let (defaults, explicit) = maps();
        let mut target: HeaderMap = [(x(), "preset")].into_iter().collect();
        HeaderMerge::Override.apply(&defaults, &explicit, &mut target);
        assert_eq!(target.get_all(&x()), [Bytes::from("explicit")]);
    }

    #[test]
    fn multi_valued_order() {
        let y = HeaderName::from_static("Y");
        let defaults: HeaderMap = [(x(), "d1"), (x(), "d2"), (y.clone(), "kept")]
            .into_iter()
            .collect();
        let explicit: HeaderMap = [(x(), "e1"), (x(), "e2")].into_iter().collect();

        let mut target = HeaderMap::new();
        HeaderMerge::Aggregate.apply(&defaults, &explicit, &mut target);
        assert_eq!(
            target.get_all(&x()),
            [
                Bytes::from("d1"),
                Bytes::from("d2"),
                Bytes::from("e1"),
                Bytes::from("e2")
            ]
        );

        let mut target = HeaderMap::new();
        HeaderMerge::Override.apply(&defaults, &explicit, &mut target);
        assert_eq!(target.get_all(&x()), [Bytes::from("e1"), Bytes::from("e2")]);
        assert_eq!(target.get_all(&y), [Bytes::from("kept")]);
    }
}
