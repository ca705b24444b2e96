use crate::path::{OwnedPath, PathError, ValuePath};
use crate::value::Value;

use super::{container_mut, get, resolve, Key, Navigation};

/// The container a path resolved to, borrowed mutably.
struct Target<'a> {
    container: &'a mut Value,
    key: Key,
    found: bool,
}

impl<'a> Target<'a> {
    fn resolve(root: &'a mut Value, path: &OwnedPath) -> Result<Option<Self>, PathError> {
        let (navigation, depth) = resolve(root, path)?;
        let Navigation {
            container,
            key,
            found,
        } = navigation;
        let (Some(_), Some(key)) = (container, key) else {
            return Ok(None);
        };

        Ok(container_mut(root, &path.segments()[..depth]).map(|container| Self {
            container,
            key,
            found,
        }))
    }

    fn remove(self) -> Option<Value> {
        match self.key {
            Key::Field(field) => self.container.as_object_mut()?.remove(field.as_str()),
            Key::Index(index) => {
                let array = self.container.as_array_mut()?;
                let index = usize::try_from(index).ok().filter(|i| *i < array.len())?;
                Some(array.remove(index))
            }
        }
    }
}

/// Removes the value at `path` and returns it. Does nothing if the path doesn't resolve to an
/// existing value.
///
/// Removing an array element shifts the elements after it.
///
/// # Errors
/// Fails on malformed paths, see [`navigate`](super::navigate).
pub fn delete_if_exists(
    root: &mut Value,
    path: impl ValuePath,
) -> Result<Option<Value>, PathError> {
    let path = path.to_owned_path()?;

    Ok(Target::resolve(root, &path)?
        .filter(|target| target.found)
        .and_then(Target::remove))
}

/// Stores `value` at `path` unless something is already there. Existing values are never
/// overwritten, and missing intermediate containers are not created: the value is only placed
/// into the container the path resolved to.
///
/// Arrays only grow at their end: inserting at index `len` appends, any other missing index is
/// left alone.
///
/// Returns whether the value was stored.
///
/// # Errors
/// Fails on malformed paths, see [`navigate`](super::navigate).
pub fn set_if_not_exists(
    root: &mut Value,
    path: impl ValuePath,
    value: impl Into<Value>,
) -> Result<bool, PathError> {
    let path = path.to_owned_path()?;
    let Some(target) = Target::resolve(root, &path)? else {
        return Ok(false);
    };
    if target.found {
        return Ok(false);
    }

    let inserted = match target.key {
        Key::Field(field) => match target.container.as_object_mut() {
            Some(map) => {
                map.insert(field, value.into());
                true
            }
            None => false,
        },
        Key::Index(index) => match target.container.as_array_mut() {
            Some(array) if usize::try_from(index).ok() == Some(array.len()) => {
                array.push(value.into());
                true
            }
            _ => false,
        },
    };
    Ok(inserted)
}

/// Removes the value at `path` if it exists and [is falsy](Value::is_falsy), returning it.
///
/// # Errors
/// Fails on malformed paths, see [`navigate`](super::navigate).
pub fn delete_if_falsy(
    root: &mut Value,
    path: impl ValuePath,
) -> Result<Option<Value>, PathError> {
    let path = path.to_owned_path()?;

    Ok(Target::resolve(root, &path)?
        .filter(|target| {
            target.found && get(&*target.container, &target.key).is_some_and(Value::is_falsy)
        })
        .and_then(Target::remove))
}

impl Value {
    /// See [`delete_if_exists`].
    ///
    /// # Errors
    /// See [`delete_if_exists`].
    pub fn delete_if_exists(&mut self, path: impl ValuePath) -> Result<Option<Self>, PathError> {
        delete_if_exists(self, path)
    }

    /// See [`set_if_not_exists`].
    ///
    /// # Errors
    /// See [`set_if_not_exists`].
    pub fn set_if_not_exists(
        &mut self,
        path: impl ValuePath,
        value: impl Into<Self>,
    ) -> Result<bool, PathError> {
        set_if_not_exists(self, path, value)
    }

    /// See [`delete_if_falsy`].
    ///
    /// # Errors
    /// See [`delete_if_falsy`].
    pub fn delete_if_falsy(&mut self, path: impl ValuePath) -> Result<Option<Self>, PathError> {
        delete_if_falsy(self, path)
    }
}
