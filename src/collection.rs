use crate::{
    DecodeReport, Error, ErrorKind, LevelObject, ObjectDecoder, ObjectEncoder, ObjectKind,
    Property, PropertyValue, Registry,
};
use std::collections::BTreeSet;

/// The ordered objects of a level.
///
/// Order is significant: it matches the order of records in the level string
/// and the positional indices that editor commands refer to.
///
/// ```
/// use levelsave::{LevelObjectCollection, Registry};
///
/// let registry = Registry::new();
/// let (objects, report) = LevelObjectCollection::decode_all("1,1,2,15,3,15;1,8,2,45,3,15;", &registry);
/// assert!(report.is_clean());
/// assert_eq!(objects.len(), 2);
/// assert_eq!(objects.encode_all(), "1,1,2,15,3,15;1,8,2,45,3,15;");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LevelObjectCollection {
    objects: Vec<LevelObject>,
}

impl LevelObjectCollection {
    pub fn new() -> Self {
        LevelObjectCollection::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        LevelObjectCollection {
            objects: Vec::with_capacity(capacity),
        }
    }

    /// Decodes every record of a level string. Bad properties are skipped and
    /// bad records dropped; both are listed in the report.
    pub fn decode_all(text: &str, registry: &Registry) -> (Self, DecodeReport) {
        // The default strategies recover from every record error
        match ObjectDecoder::new(registry).decode_all(text) {
            Ok(decoded) => decoded,
            Err(error) => {
                let mut report = DecodeReport::default();
                report.push_dropped(0, error);
                (Self::new(), report)
            }
        }
    }

    /// Encodes every object, each record terminated by `;`
    pub fn encode_all(&self) -> String {
        let mut out = String::with_capacity(self.objects.len() * 24);
        ObjectEncoder::new().encode_all(&self.objects, &mut out);
        out
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn push(&mut self, object: LevelObject) {
        self.objects.push(object)
    }

    /// Inserts an object at a position, shifting later objects back
    pub fn insert(&mut self, index: usize, object: LevelObject) -> Result<(), Error> {
        if index > self.objects.len() {
            return Err(self.out_of_bounds(index));
        }

        self.objects.insert(index, object);
        Ok(())
    }

    /// Removes and returns the object at a position
    pub fn remove(&mut self, index: usize) -> Result<LevelObject, Error> {
        if index >= self.objects.len() {
            return Err(self.out_of_bounds(index));
        }

        Ok(self.objects.remove(index))
    }

    pub fn get(&self, index: usize) -> Option<&LevelObject> {
        self.objects.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut LevelObject> {
        self.objects.get_mut(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LevelObject> {
        self.objects.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, LevelObject> {
        self.objects.iter_mut()
    }

    pub fn as_slice(&self) -> &[LevelObject] {
        &self.objects
    }

    pub fn into_vec(self) -> Vec<LevelObject> {
        self.objects
    }

    /// Swaps in a whole new set of objects and returns the previous ones
    pub fn replace(&mut self, objects: Vec<LevelObject>) -> Vec<LevelObject> {
        std::mem::replace(&mut self.objects, objects)
    }

    pub fn retain(&mut self, f: impl FnMut(&LevelObject) -> bool) {
        self.objects.retain(f)
    }

    /// Iterates the objects of a kind
    pub fn of_kind(&self, kind: ObjectKind) -> impl Iterator<Item = &LevelObject> + '_ {
        self.objects.iter().filter(move |x| x.kind() == kind)
    }

    /// Iterates the objects that belong to a group
    pub fn with_group(&self, group: i32) -> impl Iterator<Item = &LevelObject> + '_ {
        self.objects
            .iter()
            .filter(move |x| x.group_ids().contains(&group))
    }

    /// Every group id in use by an object
    pub fn used_group_ids(&self) -> BTreeSet<i32> {
        self.objects
            .iter()
            .flat_map(|x| x.group_ids().iter().copied())
            .collect()
    }

    fn out_of_bounds(&self, index: usize) -> Error {
        Error::new(ErrorKind::IndexOutOfBounds {
            index,
            len: self.objects.len(),
        })
    }

    fn checked(&self, index: usize) -> Result<&LevelObject, Error> {
        self.objects
            .get(index)
            .ok_or_else(|| self.out_of_bounds(index))
    }

    /// Returns an object holding the values that every selected object agrees
    /// on, and defaults elsewhere. Undeclared pairs are kept when every
    /// selected object has the same pair. The object id is the first
    /// selected object's.
    ///
    /// The selection must be non-empty and of a single kind.
    ///
    /// ```
    /// use levelsave::{LevelObjectCollection, Property, Registry};
    ///
    /// let registry = Registry::new();
    /// let (objects, _) = LevelObjectCollection::decode_all("1,1,2,15,3,30;1,1,2,45,3,30;", &registry);
    /// let common = objects.common_properties(&[0, 1]).unwrap();
    /// assert_eq!(common.y(), 30.0);
    /// assert!(common.is_default(Property::X));
    /// ```
    pub fn common_properties(&self, indices: &[usize]) -> Result<LevelObject, Error> {
        let (&first, rest) = indices
            .split_first()
            .ok_or_else(|| Error::new(ErrorKind::EmptySelection))?;

        let first = self.checked(first)?;
        let mut others = Vec::with_capacity(rest.len());
        for &index in rest {
            let object = self.checked(index)?;
            if object.kind() != first.kind() {
                return Err(Error::new(ErrorKind::MixedKinds));
            }
            others.push(object);
        }

        let mut result = LevelObject::new(first.kind(), first.id());
        for slot in first.descriptor().slots() {
            let value = first.slot_value(slot);
            if others.iter().all(|x| x.slot_value(slot) == value) {
                result.store(slot, value);
            }
        }

        for (key, raw) in first.extra() {
            let agreed = others
                .iter()
                .all(|x| x.extra().iter().any(|(k, r)| k == key && r == raw));
            if agreed {
                result.set_extra(*key, raw.clone());
            }
        }

        Ok(result)
    }

    /// Applies an edit to every selected object. Either every object is
    /// edited or, on error, none are.
    fn edit_selection(
        &mut self,
        indices: &[usize],
        mut edit: impl FnMut(&mut LevelObject) -> Result<(), Error>,
    ) -> Result<(), Error> {
        let mut staged = Vec::with_capacity(indices.len());
        for &index in indices {
            let mut object = self.checked(index)?.clone();
            edit(&mut object)?;
            staged.push((index, object));
        }

        for (index, object) in staged {
            self.objects[index] = object;
        }

        Ok(())
    }

    /// Sets a property on every selected object
    pub fn set_property(
        &mut self,
        indices: &[usize],
        property: Property,
        value: PropertyValue,
    ) -> Result<(), Error> {
        self.edit_selection(indices, |object| object.set(property, value.clone()))
    }

    /// Adds a delta to a numeric property of every selected object
    pub fn offset_property(
        &mut self,
        indices: &[usize],
        property: Property,
        delta: f64,
    ) -> Result<(), Error> {
        self.edit_selection(indices, |object| object.offset(property, delta))
    }
}

impl From<Vec<LevelObject>> for LevelObjectCollection {
    fn from(objects: Vec<LevelObject>) -> Self {
        LevelObjectCollection { objects }
    }
}

impl FromIterator<LevelObject> for LevelObjectCollection {
    fn from_iter<T: IntoIterator<Item = LevelObject>>(iter: T) -> Self {
        LevelObjectCollection {
            objects: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for LevelObjectCollection {
    type Item = LevelObject;
    type IntoIter = std::vec::IntoIter<LevelObject>;

    fn into_iter(self) -> Self::IntoIter {
        self.objects.into_iter()
    }
}

impl<'a> IntoIterator for &'a LevelObjectCollection {
    type Item = &'a LevelObject;
    type IntoIter = std::slice::Iter<'a, LevelObject>;

    fn into_iter(self) -> Self::IntoIter {
        self.objects.iter()
    }
}

impl std::ops::Index<usize> for LevelObjectCollection {
    type Output = LevelObject;

    fn index(&self, index: usize) -> &Self::Output {
        &self.objects[index]
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for LevelObjectCollection {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_seq(&self.objects)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(text: &str) -> LevelObjectCollection {
        let registry = Registry::new();
        let (objects, report) = LevelObjectCollection::decode_all(text, &registry);
        assert!(report.is_clean(), "{:?}", report);
        objects
    }

    #[test]
    fn ordering_is_preserved() {
        let objects = decode("1,8;1,1;1,12;1,901;");
        let ids: Vec<_> = objects.iter().map(|x| x.id()).collect();
        assert_eq!(ids, vec![8, 1, 12, 901]);
    }

    #[test]
    fn dropped_records_are_reported() {
        let registry = Registry::new();
        let (objects, report) =
            LevelObjectCollection::decode_all("1,1;1,749,2,3;1,901,51,x;", &registry);
        assert_eq!(objects.len(), 2);
        assert_eq!(report.dropped().len(), 1);
        assert_eq!(report.dropped()[0].record, 1);
        assert_eq!(report.skipped().len(), 1);
        assert_eq!(report.skipped()[0].record, 2);
    }

    #[test]
    fn decode_all_agrees_with_decoder() {
        let registry = Registry::new();
        let text = "1,1,2,15;2,30;1,901,51,x,x7,3;1,749;01,12,2,50;";
        let (objects, report) = LevelObjectCollection::decode_all(text, &registry);
        let (expected, expected_report) = ObjectDecoder::new(&registry).decode_all(text).unwrap();
        assert_eq!(objects, expected);
        assert_eq!(report.skipped(), expected_report.skipped());
        assert_eq!(report.dropped().len(), 2);
        assert_eq!(report.skipped().len(), 2);
        assert_eq!(objects.len(), 3);
    }

    #[test]
    fn insert_and_remove() {
        let mut objects = decode("1,1;1,2;");
        objects
            .insert(1, LevelObject::new(ObjectKind::Generic, 3))
            .unwrap();
        objects
            .insert(3, LevelObject::new(ObjectKind::Generic, 4))
            .unwrap();
        assert!(objects
            .insert(9, LevelObject::new(ObjectKind::Generic, 5))
            .is_err());

        let ids: Vec<_> = objects.iter().map(|x| x.id()).collect();
        assert_eq!(ids, vec![1, 3, 2, 4]);

        assert_eq!(objects.remove(1).unwrap().id(), 3);
        assert!(matches!(
            objects.remove(3).unwrap_err().kind(),
            ErrorKind::IndexOutOfBounds { index: 3, len: 3 }
        ));
    }

    #[test]
    fn replace_returns_previous() {
        let mut objects = decode("1,1;1,2;");
        let previous = objects.replace(vec![LevelObject::new(ObjectKind::Generic, 9)]);
        assert_eq!(previous.len(), 2);
        assert_eq!(objects.encode_all(), "1,9;");
    }

    #[test]
    fn group_queries() {
        let objects = decode("1,1,57,2.3;1,1,57,3;1,901,51,4;");
        assert_eq!(objects.with_group(3).count(), 2);
        assert_eq!(objects.of_kind(ObjectKind::MoveTrigger).count(), 1);
        assert_eq!(
            objects.used_group_ids().into_iter().collect::<Vec<_>>(),
            vec![2, 3]
        );
    }

    #[test]
    fn common_properties_keep_agreement() {
        let objects = decode("1,901,2,15,10,2,51,4,87,1,200,x;1,901,2,45,10,2,51,5,87,1,200,x;");
        let common = objects.common_properties(&[0, 1]).unwrap();
        assert_eq!(common.kind(), ObjectKind::MoveTrigger);
        assert_eq!(common.get(Property::Duration), Some(PropertyValue::Double(2.0)));
        assert_eq!(common.get(Property::MultiTrigger), Some(PropertyValue::Bool(true)));
        assert!(common.is_default(Property::X));
        assert!(common.is_default(Property::TargetGroupId));
        assert_eq!(common.extra(), &[(200, String::from("x"))]);
    }

    #[test]
    fn common_properties_single() {
        let objects = decode("1,1,2,15,3,20;");
        assert_eq!(objects.common_properties(&[0]).unwrap(), objects[0]);
    }

    #[test]
    fn common_properties_errors() {
        let objects = decode("1,1;1,901;");
        assert!(matches!(
            objects.common_properties(&[]).unwrap_err().kind(),
            ErrorKind::EmptySelection
        ));
        assert!(matches!(
            objects.common_properties(&[0, 1]).unwrap_err().kind(),
            ErrorKind::MixedKinds
        ));
        assert!(matches!(
            objects.common_properties(&[0, 5]).unwrap_err().kind(),
            ErrorKind::IndexOutOfBounds { .. }
        ));
    }

    #[test]
    fn set_property_is_all_or_nothing() {
        let mut objects = decode("1,901;1,1;");
        let before = objects.clone();
        let err = objects
            .set_property(&[0, 1], Property::Duration, 2.0.into())
            .unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::UnknownProperty { .. }));
        assert_eq!(objects, before);

        objects
            .set_property(&[0, 1], Property::X, 30.0.into())
            .unwrap();
        assert!(objects.iter().all(|x| x.x() == 30.0));
    }

    #[test]
    fn offset_property_moves_selection() {
        let mut objects = decode("1,1,2,15;1,1,2,30;1,1,2,45;");
        objects.offset_property(&[0, 2], Property::X, 30.0).unwrap();
        let xs: Vec<_> = objects.iter().map(|x| x.x()).collect();
        assert_eq!(xs, vec![45.0, 30.0, 75.0]);
    }
}
