//! Filesystem view of a request.
//!
//! Only the lifecycle lives here; mapping a URI path onto these fields is
//! left to whatever handler serves files.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Physical {
    /// Full filesystem path
    pub path: String,
    pub basedir: String,
    pub doc_root: String,
    /// Path relative to `doc_root`
    pub rel_path: String,
    /// Trailing part of the URI path past the matched file
    pub pathinfo: String,
    pub have_stat: bool,
    pub have_errno: bool,
}

impl Physical {
    pub fn new() -> Self {
        Self {
            path: String::with_capacity(127),
            basedir: String::with_capacity(63),
            doc_root: String::with_capacity(63),
            rel_path: String::with_capacity(63),
            pathinfo: String::with_capacity(63),
            have_stat: false,
            have_errno: false,
        }
    }

    pub fn reset(&mut self) {
        self.path.clear();
        self.basedir.clear();
        self.doc_root.clear();
        self.rel_path.clear();
        self.pathinfo.clear();
        self.have_stat = false;
        self.have_errno = false;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_and_clear_restore_empty_state() {
        let mut phys = Physical::new();
        phys.path.push_str("/srv/www/index.html");
        phys.doc_root.push_str("/srv/www");
        phys.have_stat = true;

        phys.reset();
        assert_eq!(phys, Physical::default());
        assert!(phys.path.capacity() >= 127);

        phys.have_errno = true;
        phys.clear();
        assert_eq!(phys, Physical::default());
        assert_eq!(phys.path.capacity(), 0);
    }
}
