quantity!(Hours, suffix: "h", precision: 0);

impl From<u32> for Hours {
    fn from(hours: u32) -> Self {
        Self(f64::from(hours))
    }
}
