pub struct RegionCode {}

#[allow(unused)]
impl RegionCode {
    pub fn ad() -> &'static str {
        "AD"
    }

    pub fn ag() -> &'static str {
        "AG"
    }

    pub fn au() -> &'static str {
        "AU"
    }

    pub fn br() -> &'static str {
        "BR"
    }

    pub fn bs() -> &'static str {
        "BS"
    }

    pub fn bz() -> &'static str {
        "BZ"
    }

    pub fn ca() -> &'static str {
        "CA"
    }

    pub fn ch() -> &'static str {
        "CH"
    }

    pub fn cr() -> &'static str {
        "CR"
    }

    pub fn de() -> &'static str {
        "DE"
    }

    pub fn fr() -> &'static str {
        "FR"
    }

    pub fn gb() -> &'static str {
        "GB"
    }

    pub fn it() -> &'static str {
        "IT"
    }

    pub fn kz() -> &'static str {
        "KZ"
    }

    pub fn ru() -> &'static str {
        "RU"
    }

    pub fn to() -> &'static str {
        "TO"
    }

    pub fn us() -> &'static str {
        "US"
    }

    pub fn va() -> &'static str {
        "VA"
    }

    pub fn un001() -> &'static str {
        "001"
    }

    pub fn zz() -> &'static str {
        "ZZ"
    }
}
