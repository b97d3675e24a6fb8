use crate::engine::LocalityMap;
use once_cell::sync::Lazy;

/// The twelve administrative regions and the provinces/prefectures in each.
pub const REGIONS: &[(&str, &[&str])] = &[
    (
        "طنجة-تطوان-الحسيمة",
        &["طنجة-أصيلة", "المضيق-الفنيدق", "تطوان", "الفحص-أنجرة", "العرائش", "الحسيمة", "شفشاون", "وزان"],
    ),
    ("الجهة الشرقية", &["وجدة-أنجاد", "الناظور", "الدريوش", "جرادة", "بركان", "تاوريرت", "جرسيف", "فكيك"]),
    ("فاس-مكناس", &["فاس", "مكناس", "الحاجب", "إفران", "مولاي يعقوب", "صفرو", "بولمان", "تاونات", "تازة"]),
    (
        "الرباط-سلا-القنيطرة",
        &["الرباط", "سلا", "الصخيرات-تمارة", "القنيطرة", "الخميسات", "سيدي قاسم", "سيدي سليمان"],
    ),
    ("بني ملال-خنيفرة", &["بني ملال", "أزيلال", "الفقيه بن صالح", "خنيفرة", "خريبكة"]),
    (
        "الدار البيضاء-سطات",
        &["الدار البيضاء", "المحمدية", "الجديدة", "النواصر", "مديونة", "بنسليمان", "برشيد", "سطات", "سيدي بنور"],
    ),
    ("مراكش-آسفي", &["مراكش", "شيشاوة", "الحوز", "قلعة السراغنة", "الصويرة", "الرحامنة", "آسفي", "اليوسفية"]),
    ("درعة-تافيلالت", &["الرشيدية", "ورزازات", "ميدلت", "تنغير", "زاكورة"]),
    ("سوس-ماسة", &["أكادير-إيدا أوتنان", "إنزكان-آيت ملول", "اشتوكة آيت باها", "تارودانت", "تزنيت", "طاطا"]),
    ("كلميم-واد نون", &["كلميم", "آسا الزاك", "طانطان", "سيدي إفني"]),
    ("العيون-الساقية الحمراء", &["العيون", "بوجدور", "السمارة", "طرفاية"]),
    ("الداخلة-وادي الذهب", &["وادي الذهب", "أوسرد"]),
];

pub static LOCALITIES: Lazy<LocalityMap> = Lazy::new(|| LocalityMap::from_table(REGIONS));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_locality_is_indexed() {
        let total: usize = REGIONS.iter().map(|(_, l)| l.len()).sum();
        assert_eq!(REGIONS.len(), 12);
        assert_eq!(LOCALITIES.len(), total);
    }

    #[test]
    fn lookups() {
        assert_eq!(LOCALITIES.region_of("الرباط"), Some("الرباط-سلا-القنيطرة"));
        assert_eq!(LOCALITIES.region_of("سيدي بنور"), Some("الدار البيضاء-سطات"));
        assert_eq!(LOCALITIES.region_of("أوسرد"), Some("الداخلة-وادي الذهب"));
        assert_eq!(LOCALITIES.region_of("باريس"), None);
    }
}
