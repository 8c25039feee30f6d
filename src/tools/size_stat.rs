use std::fmt::{Display, Formatter};

/// Byte counts reported after compressing a code section.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SizeStat {
    /// Size of the code section before compression.
    pub initial_code_size: usize,
    /// Size of the encoded bitstream, not counting the metadata byte.
    pub final_code_size: usize,
    /// Combined size of every dictionary blob.
    pub dict_size: usize,
}

impl SizeStat {
    /// Encoded bitstream plus dictionaries.
    pub fn total(&self) -> usize {
        self.final_code_size + self.dict_size
    }

    /// Compressed total as a fraction of the initial size.
    pub fn ratio(&self) -> f64 {
        if self.initial_code_size == 0 {
            return 1.0;
        }
        self.total() as f64 / self.initial_code_size as f64
    }
}

impl Display for SizeStat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} bytes of code + {} bytes of dictionaries = {} ({} initially, {:.1}%)",
            self.final_code_size,
            self.dict_size,
            self.total(),
            self.initial_code_size,
            self.ratio() * 100.0
        )
    }
}

#[test]
fn size_stat_test() {
    let stat = SizeStat {
        initial_code_size: 400,
        final_code_size: 250,
        dict_size: 50,
    };
    assert_eq!(stat.total(), 300);
    assert!((stat.ratio() - 0.75).abs() < 1e-9);
    assert_eq!(
        stat.to_string(),
        "250 bytes of code + 50 bytes of dictionaries = 300 (400 initially, 75.0%)"
    );
    assert_eq!(SizeStat::default().ratio(), 1.0);
}
