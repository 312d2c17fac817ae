use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

use uuid::Uuid;

/// Identifier of a stored record, tagged with the record type it names.
///
/// Ids travel as hyphenated UUID strings in URLs, JSON:API `id` members and
/// the `reunions.id` column. Parsing goes through `FromStr`, so a path
/// segment such as `with_soft_delete` or a numeric id is simply not an id.
pub struct Id<T> {
    pub value: Uuid,
    _record: PhantomData<fn() -> T>,
}

impl<T> Id<T> {
    pub fn new(value: Uuid) -> Self {
        Self {
            value,
            _record: PhantomData,
        }
    }

    /// A fresh random (v4) id for a record about to be inserted.
    pub fn generate() -> Self {
        Self::new(Uuid::new_v4())
    }
}

impl<T> FromStr for Id<T> {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self::new)
    }
}

// Manual impls: derives would put bounds on `T`, and record types are
// neither `Copy` nor `Eq`.
impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for Id<T> {}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.value)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.value.hyphenated(), f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Reunion;

    #[test]
    fn each_new_reunion_gets_its_own_id() {
        assert_ne!(Reunion::create().id, Reunion::create().id);
    }

    #[test]
    fn url_form_parses_back_to_the_same_id() {
        let id = Reunion::create().id;
        let url = format!("/reunions/{id}");
        let segment = url.rsplit('/').next().unwrap();
        assert_eq!(segment.parse::<Id<Reunion>>().unwrap(), id);
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        let id = Id::<Reunion>::generate();
        assert_eq!(format!(" {id}\n").parse::<Id<Reunion>>().unwrap(), id);
    }

    #[test]
    fn other_route_segments_are_not_ids() {
        for segment in ["42", "with_soft_delete", "publish", ""] {
            assert!(segment.parse::<Id<Reunion>>().is_err(), "{segment:?} parsed");
        }
    }

    #[test]
    fn display_is_lowercase_hyphenated() {
        let id = Id::<Reunion>::new(Uuid::from_u128(0xA1B2_C3D4_0000_0000_0000_0000_0000_0001));
        assert_eq!(id.to_string(), "a1b2c3d4-0000-0000-0000-000000000001");
    }
}
