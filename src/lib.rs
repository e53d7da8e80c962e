/*!

A decoder and encoder for obfuscated game level saves and the positional
object records inside them.

A level save is layered:

- an outer save: an xml document that is gzip compressed, base64 encoded and
  XOR'd with a single byte key
- level strings embedded in the document: gzip compressed and base64 encoded
- object records inside a level string: `;` terminated lists of `key,value`
  pairs where the meaning of each numeric key depends on the kind of object
  (selected by the object id under key `1`)

## Features

- ✔ Faithful: byte level transforms reproduce the game's envelopes exactly
- ✔ Typed: every property of every object kind is declared with its type and
  default, looked up by `(kind, key)` and never by key alone
- ✔ Forgiving: a bad property only loses that property and a bad record only
  loses that record; every failure is reported
- ✔ Lossless: undeclared keys and out of range enumeration values survive a
  decode and encode cycle
- ✔ Parallel: records decode independently across threads with identical
  results

## Quick Start

```rust
use levelsave::{LevelObjectCollection, ObjectKind, Property, PropertyValue, Registry};

let registry = Registry::new();
let (mut objects, report) = LevelObjectCollection::decode_all("1,12,2,50,3,75;1,901,51,abc;", &registry);

// The move trigger's target group failed to parse and was skipped
assert_eq!(report.skipped().len(), 1);

let portal = objects.get(0).unwrap();
assert_eq!(portal.kind(), ObjectKind::CubePortal);
assert_eq!(portal.get(Property::X), Some(PropertyValue::Double(50.0)));

objects.offset_property(&[0], Property::X, 10.0).unwrap();
assert_eq!(objects.encode_all(), "1,12,2,60,3,75;1,901;");
```

## Envelopes

Level strings are usually compressed, and the outer save obfuscated. The
[envelope] module detects and undoes both, and [`envelope::SaveFile`] wraps the
read, edit and write back cycle.

```rust
use levelsave::envelope::{decrypt_level_string, encrypt_level_string};

let packed = encrypt_level_string("1,1,2,15,3,15;").unwrap();
assert!(packed.starts_with("H4sIAAAAAAAA"));
assert_eq!(decrypt_level_string(&packed).unwrap(), "1,1,2,15,3,15;");
```

## Caveats

Caller is responsible for:

- Reading and writing the artifact. The codec performs no I/O.
- Building the [`Registry`] once and sharing it.

Re-encoded output is semantically equivalent to the input but not necessarily
byte identical: properties explicitly written with their default value are
omitted.

*/

mod collection;
mod decode;
mod encode;
mod enums;
pub mod envelope;
mod errors;
mod level;
mod object;
mod property;
pub mod registry;
mod scalar;
pub mod transform;
mod value;

pub use self::collection::*;
pub use self::decode::*;
pub use self::encode::*;
pub use self::enums::*;
pub use self::errors::*;
pub use self::level::*;
pub use self::object::*;
pub use self::property::*;
pub use self::registry::{
    KindDescriptor, ObjectIds, ObjectKind, PropertySlot, Registry, Storage, OBJECT_ID_KEY,
};
pub use self::scalar::{Scalar, ScalarError};
pub use self::value::*;
