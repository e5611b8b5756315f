//! Display name and formatting for DartType.

use super::{names, DartType};
use std::borrow::Cow;

impl DartType {
    /// Bare class name, without type arguments.
    pub fn name(&self) -> Cow<'_, str> {
        match self {
            DartType::Dynamic => names::DYNAMIC.into(),
            DartType::Interface { name, .. } => Cow::Borrowed(name.as_ref()),
        }
    }
}

impl std::fmt::Display for DartType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name())?;
        let args = self.type_arguments();
        if !args.is_empty() {
            f.write_str("<")?;
            for (i, arg) in args.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{}", arg)?;
            }
            f.write_str(">")?;
        }
        Ok(())
    }
}
