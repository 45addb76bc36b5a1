use std::collections::HashMap;

/// Immutable surface-form → canonical-form dictionary.
///
/// Entries keep their insertion order; containment matching in the
/// normalizer walks them in that order and the first hit wins. Keys are
/// stored lowercased so lookups are case-insensitive for Latin script
/// (kana and kanji have no case and pass through unchanged).
#[derive(Debug, Clone, Default)]
pub struct SynonymTable {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl SynonymTable {
    /// Builds a table from `(surface, canonical)` pairs.
    ///
    /// Every canonical form is also registered as a surface form of itself,
    /// so normalizing an already-canonical name is a fixed point. When a
    /// surface form appears twice the first mapping is kept.
    pub fn new<I, S, C>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, C)>,
        S: AsRef<str>,
        C: AsRef<str>,
    {
        let mut table = Self::default();
        for (surface, canonical) in pairs {
            let canonical = canonical.as_ref().trim().to_lowercase();
            table.insert(&canonical, &canonical);
            table.insert(surface.as_ref(), &canonical);
        }
        table
    }

    fn insert(&mut self, surface: &str, canonical: &str) {
        let key = surface.trim().to_lowercase();
        if key.is_empty() || self.index.contains_key(&key) {
            return;
        }
        self.index.insert(key.clone(), self.entries.len());
        self.entries.push((key, canonical.to_string()));
    }

    /// Full ingredient vocabulary: hiragana, katakana, kanji, loanword and
    /// English spellings mapped onto one Japanese display form.
    pub fn ingredients() -> Self {
        Self::new(INGREDIENT_SYNONYMS.iter().copied())
    }

    /// Reduced vocabulary used by the basic normalizer tier.
    pub fn basic_ingredients() -> Self {
        Self::new(BASIC_INGREDIENT_SYNONYMS.iter().copied())
    }

    /// Japanese → English dictionary used to pick catalog search terms when
    /// the translation provider is unavailable.
    pub fn english_search_terms() -> Self {
        Self::new(ENGLISH_SEARCH_TERMS.iter().copied())
    }

    pub fn lookup(&self, raw: &str) -> Option<&str> {
        let key = raw.trim().to_lowercase();
        self.index
            .get(&key)
            .map(|&i| self.entries[i].1.as_str())
    }

    /// `(surface, canonical)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(s, c)| (s.as_str(), c.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

const INGREDIENT_SYNONYMS: &[(&str, &str)] = &[
    // 野菜
    ("たまねぎ", "たまねぎ"),
    ("玉ねぎ", "たまねぎ"),
    ("タマネギ", "たまねぎ"),
    ("オニオン", "たまねぎ"),
    ("onion", "たまねぎ"),
    ("にんじん", "にんじん"),
    ("ニンジン", "にんじん"),
    ("人参", "にんじん"),
    ("キャロット", "にんじん"),
    ("carrot", "にんじん"),
    ("じゃがいも", "じゃがいも"),
    ("ジャガイモ", "じゃがいも"),
    ("ポテト", "じゃがいも"),
    ("potato", "じゃがいも"),
    ("とまと", "トマト"),
    ("トマト", "トマト"),
    ("tomato", "トマト"),
    ("きゅうり", "きゅうり"),
    ("キュウリ", "きゅうり"),
    ("cucumber", "きゅうり"),
    ("なす", "なす"),
    ("ナス", "なす"),
    ("茄子", "なす"),
    ("eggplant", "なす"),
    ("ぴーまん", "ピーマン"),
    ("ピーマン", "ピーマン"),
    ("bell pepper", "ピーマン"),
    ("きゃべつ", "キャベツ"),
    ("キャベツ", "キャベツ"),
    ("cabbage", "キャベツ"),
    ("れたす", "レタス"),
    ("レタス", "レタス"),
    ("lettuce", "レタス"),
    ("ほうれんそう", "ほうれん草"),
    ("ほうれん草", "ほうれん草"),
    ("スピナッチ", "ほうれん草"),
    ("spinach", "ほうれん草"),
    ("ぶろっこりー", "ブロッコリー"),
    ("ブロッコリー", "ブロッコリー"),
    ("broccoli", "ブロッコリー"),
    ("もやし", "もやし"),
    ("モヤシ", "もやし"),
    ("bean sprouts", "もやし"),
    // きのこ
    ("しめじ", "しめじ"),
    ("シメジ", "しめじ"),
    ("shimeji mushroom", "しめじ"),
    ("えのき", "えのき"),
    ("エノキ", "えのき"),
    ("enoki mushroom", "えのき"),
    ("しいたけ", "しいたけ"),
    ("シイタケ", "しいたけ"),
    ("shiitake mushroom", "しいたけ"),
    // 肉類
    ("べーこん", "ベーコン"),
    ("ベーコン", "ベーコン"),
    ("bacon", "ベーコン"),
    ("はむ", "ハム"),
    ("ハム", "ハム"),
    ("ham", "ハム"),
    ("そーせーじ", "ソーセージ"),
    ("ソーセージ", "ソーセージ"),
    ("sausage", "ソーセージ"),
    ("とりにく", "鶏肉"),
    ("鶏肉", "鶏肉"),
    ("チキン", "鶏肉"),
    ("chicken", "鶏肉"),
    ("ぎゅうにく", "牛肉"),
    ("牛肉", "牛肉"),
    ("ビーフ", "牛肉"),
    ("beef", "牛肉"),
    ("ぶたにく", "豚肉"),
    ("豚肉", "豚肉"),
    ("ポーク", "豚肉"),
    ("pork", "豚肉"),
    ("ひきにく", "ひき肉"),
    ("ひき肉", "ひき肉"),
    ("みんち", "ひき肉"),
    ("ground meat", "ひき肉"),
    // 魚介類
    ("さかな", "魚"),
    ("魚", "魚"),
    ("フィッシュ", "魚"),
    ("fish", "魚"),
    ("さーもん", "サーモン"),
    ("サーモン", "サーモン"),
    ("鮭", "サーモン"),
    ("salmon", "サーモン"),
    ("まぐろ", "まぐろ"),
    ("マグロ", "まぐろ"),
    ("ツナ", "まぐろ"),
    ("tuna", "まぐろ"),
    ("えび", "えび"),
    ("エビ", "えび"),
    ("海老", "えび"),
    ("shrimp", "えび"),
    ("いか", "いか"),
    ("イカ", "いか"),
    ("squid", "いか"),
    // 基本食材
    ("たまご", "卵"),
    ("卵", "卵"),
    ("タマゴ", "卵"),
    ("egg", "卵"),
    ("ちーず", "チーズ"),
    ("チーズ", "チーズ"),
    ("cheese", "チーズ"),
    ("ぎゅうにゅう", "牛乳"),
    ("牛乳", "牛乳"),
    ("ミルク", "牛乳"),
    ("milk", "牛乳"),
    ("ばたー", "バター"),
    ("バター", "バター"),
    ("butter", "バター"),
    ("こめ", "米"),
    ("米", "米"),
    ("ライス", "米"),
    ("rice", "米"),
    ("ぱん", "パン"),
    ("パン", "パン"),
    ("ブレッド", "パン"),
    ("bread", "パン"),
    ("こむぎこ", "小麦粉"),
    ("小麦粉", "小麦粉"),
    ("flour", "小麦粉"),
    // 調味料
    ("しお", "塩"),
    ("塩", "塩"),
    ("ソルト", "塩"),
    ("salt", "塩"),
    ("さとう", "砂糖"),
    ("砂糖", "砂糖"),
    ("シュガー", "砂糖"),
    ("sugar", "砂糖"),
    ("しょうゆ", "醤油"),
    ("醤油", "醤油"),
    ("soy sauce", "醤油"),
    ("みそ", "味噌"),
    ("味噌", "味噌"),
    ("miso", "味噌"),
    ("す", "酢"),
    ("酢", "酢"),
    ("ビネガー", "酢"),
    ("vinegar", "酢"),
    ("おりーぶおいる", "オリーブオイル"),
    ("オリーブオイル", "オリーブオイル"),
    ("olive oil", "オリーブオイル"),
    ("にんにく", "ニンニク"),
    ("ニンニク", "ニンニク"),
    ("ガーリック", "ニンニク"),
    ("garlic", "ニンニク"),
    ("しょうが", "生姜"),
    ("生姜", "生姜"),
    ("ジンジャー", "生姜"),
    ("ginger", "生姜"),
    ("こしょう", "こしょう"),
    ("コショウ", "こしょう"),
    ("ペッパー", "こしょう"),
    ("pepper", "こしょう"),
    // 果物
    ("りんご", "りんご"),
    ("リンゴ", "りんご"),
    ("アップル", "りんご"),
    ("apple", "りんご"),
    ("ばなな", "バナナ"),
    ("バナナ", "バナナ"),
    ("banana", "バナナ"),
    ("みかん", "みかん"),
    ("ミカン", "みかん"),
    ("オレンジ", "みかん"),
    ("orange", "みかん"),
    ("いちご", "いちご"),
    ("イチゴ", "いちご"),
    ("ストロベリー", "いちご"),
    ("strawberry", "いちご"),
    ("ぶどう", "ぶどう"),
    ("ブドウ", "ぶどう"),
    ("グレープ", "ぶどう"),
    ("grape", "ぶどう"),
    // その他
    ("とうふ", "豆腐"),
    ("豆腐", "豆腐"),
    ("tofu", "豆腐"),
    ("なっとう", "納豆"),
    ("納豆", "納豆"),
    ("natto", "納豆"),
    ("わかめ", "わかめ"),
    ("ワカメ", "わかめ"),
    ("wakame", "わかめ"),
    ("のり", "のり"),
    ("ノリ", "のり"),
    ("海苔", "のり"),
    ("seaweed", "のり"),
];

const BASIC_INGREDIENT_SYNONYMS: &[(&str, &str)] = &[
    ("玉ねぎ", "たまねぎ"),
    ("タマネギ", "たまねぎ"),
    ("ニンジン", "にんじん"),
    ("人参", "にんじん"),
    ("ジャガイモ", "じゃがいも"),
    ("とまと", "トマト"),
    ("べーこん", "ベーコン"),
    ("はむ", "ハム"),
    ("とりにく", "鶏肉"),
    ("ぎゅうにく", "牛肉"),
    ("ぶたにく", "豚肉"),
];

const ENGLISH_SEARCH_TERMS: &[(&str, &str)] = &[
    // 肉類
    ("ベーコン", "bacon"),
    ("べーこん", "bacon"),
    ("ハム", "ham"),
    ("はむ", "ham"),
    ("ソーセージ", "sausage"),
    ("そーせーじ", "sausage"),
    ("鶏肉", "chicken"),
    ("とりにく", "chicken"),
    ("チキン", "chicken"),
    ("牛肉", "beef"),
    ("ぎゅうにく", "beef"),
    ("ビーフ", "beef"),
    ("豚肉", "pork"),
    ("ぶたにく", "pork"),
    ("ポーク", "pork"),
    ("ひき肉", "ground meat"),
    ("みんち", "ground meat"),
    // 野菜
    ("たまねぎ", "onion"),
    ("玉ねぎ", "onion"),
    ("タマネギ", "onion"),
    ("オニオン", "onion"),
    ("ニンジン", "carrot"),
    ("にんじん", "carrot"),
    ("人参", "carrot"),
    ("キャロット", "carrot"),
    ("じゃがいも", "potato"),
    ("ジャガイモ", "potato"),
    ("ポテト", "potato"),
    ("トマト", "tomato"),
    ("とまと", "tomato"),
    ("レタス", "lettuce"),
    ("れたす", "lettuce"),
    ("キャベツ", "cabbage"),
    ("きゃべつ", "cabbage"),
    ("ピーマン", "bell pepper"),
    ("ぴーまん", "bell pepper"),
    ("きゅうり", "cucumber"),
    ("キュウリ", "cucumber"),
    ("なす", "eggplant"),
    ("ナス", "eggplant"),
    ("茄子", "eggplant"),
    ("ブロッコリー", "broccoli"),
    ("ぶろっこりー", "broccoli"),
    ("ほうれん草", "spinach"),
    ("ほうれんそう", "spinach"),
    ("スピナッチ", "spinach"),
    ("アスパラ", "asparagus"),
    ("アスパラガス", "asparagus"),
    ("もやし", "bean sprouts"),
    ("モヤシ", "bean sprouts"),
    ("しめじ", "shimeji mushroom"),
    ("シメジ", "shimeji mushroom"),
    ("えのき", "enoki mushroom"),
    ("エノキ", "enoki mushroom"),
    ("しいたけ", "shiitake mushroom"),
    ("シイタケ", "shiitake mushroom"),
    // 基本食材
    ("卵", "egg"),
    ("たまご", "egg"),
    ("タマゴ", "egg"),
    ("チーズ", "cheese"),
    ("ちーず", "cheese"),
    ("牛乳", "milk"),
    ("ぎゅうにゅう", "milk"),
    ("ミルク", "milk"),
    ("バター", "butter"),
    ("ばたー", "butter"),
    ("米", "rice"),
    ("こめ", "rice"),
    ("ライス", "rice"),
    ("パン", "bread"),
    ("ぱん", "bread"),
    ("ブレッド", "bread"),
    ("小麦粉", "flour"),
    ("こむぎこ", "flour"),
    // 魚介類
    ("魚", "fish"),
    ("さかな", "fish"),
    ("フィッシュ", "fish"),
    ("サーモン", "salmon"),
    ("さーもん", "salmon"),
    ("鮭", "salmon"),
    ("まぐろ", "tuna"),
    ("マグロ", "tuna"),
    ("ツナ", "tuna"),
    ("えび", "shrimp"),
    ("エビ", "shrimp"),
    ("海老", "shrimp"),
    ("いか", "squid"),
    ("イカ", "squid"),
    // 麺類
    ("パスタ", "pasta"),
    ("ぱすた", "pasta"),
    ("スパゲッティ", "spaghetti"),
    ("すぱげってぃ", "spaghetti"),
    ("うどん", "udon"),
    ("ウドン", "udon"),
    ("そば", "soba"),
    ("ソバ", "soba"),
    ("ラーメン", "ramen"),
    ("らーめん", "ramen"),
    ("中華麺", "chinese noodles"),
    ("ちゅうかめん", "chinese noodles"),
    // 調味料
    ("塩", "salt"),
    ("しお", "salt"),
    ("ソルト", "salt"),
    ("砂糖", "sugar"),
    ("さとう", "sugar"),
    ("シュガー", "sugar"),
    ("醤油", "soy sauce"),
    ("しょうゆ", "soy sauce"),
    ("味噌", "miso"),
    ("みそ", "miso"),
    ("酢", "vinegar"),
    ("す", "vinegar"),
    ("ビネガー", "vinegar"),
    ("オリーブオイル", "olive oil"),
    ("おりーぶおいる", "olive oil"),
    ("ニンニク", "garlic"),
    ("にんにく", "garlic"),
    ("ガーリック", "garlic"),
    ("生姜", "ginger"),
    ("しょうが", "ginger"),
    ("ジンジャー", "ginger"),
    ("こしょう", "pepper"),
    ("コショウ", "pepper"),
    ("ペッパー", "pepper"),
    // 料理名
    ("カレー", "curry"),
    ("かれー", "curry"),
    ("スープ", "soup"),
    ("すーぷ", "soup"),
    ("サラダ", "salad"),
    ("さらだ", "salad"),
    ("ピザ", "pizza"),
    ("ぴざ", "pizza"),
    ("ハンバーガー", "hamburger"),
    ("はんばーがー", "hamburger"),
    ("オムライス", "omelet rice"),
    ("おむらいす", "omelet rice"),
    ("チャーハン", "fried rice"),
    ("ちゃーはん", "fried rice"),
    ("から揚げ", "fried chicken"),
    ("からあげ", "fried chicken"),
    ("唐揚げ", "fried chicken"),
    ("ハンバーグ", "hamburger steak"),
    ("はんばーぐ", "hamburger steak"),
    ("天ぷら", "tempura"),
    ("てんぷら", "tempura"),
    ("寿司", "sushi"),
    ("すし", "sushi"),
    ("刺身", "sashimi"),
    ("さしみ", "sashimi"),
    ("焼き魚", "grilled fish"),
    ("やきざかな", "grilled fish"),
    ("ステーキ", "steak"),
    ("すてーき", "steak"),
    ("煮物", "simmered dish"),
    ("にもの", "simmered dish"),
    ("炒め物", "stir fry"),
    ("いためもの", "stir fry"),
    // 果物
    ("りんご", "apple"),
    ("リンゴ", "apple"),
    ("アップル", "apple"),
    ("バナナ", "banana"),
    ("ばなな", "banana"),
    ("みかん", "orange"),
    ("ミカン", "orange"),
    ("オレンジ", "orange"),
    ("いちご", "strawberry"),
    ("イチゴ", "strawberry"),
    ("ストロベリー", "strawberry"),
    ("ぶどう", "grape"),
    ("ブドウ", "grape"),
    ("グレープ", "grape"),
    // その他
    ("豆腐", "tofu"),
    ("とうふ", "tofu"),
    ("納豆", "natto"),
    ("なっとう", "natto"),
    ("わかめ", "wakame"),
    ("ワカメ", "wakame"),
    ("のり", "seaweed"),
    ("ノリ", "seaweed"),
    ("海苔", "seaweed"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive_for_latin() {
        let table = SynonymTable::ingredients();
        assert_eq!(table.lookup("Onion"), Some("たまねぎ"));
        assert_eq!(table.lookup("  SOY SAUCE "), Some("醤油"));
        assert_eq!(table.lookup("タマネギ"), Some("たまねぎ"));
        assert_eq!(table.lookup("ドラゴンフルーツ"), None);
    }

    #[test]
    fn canonical_forms_map_to_themselves() {
        let table = SynonymTable::new([("玉ねぎ", "たまねぎ")]);
        assert_eq!(table.lookup("たまねぎ"), Some("たまねぎ"));
        assert_eq!(table.len(), 2);

        let full = SynonymTable::ingredients();
        for (_, canonical) in full.iter() {
            assert_eq!(full.lookup(canonical), Some(canonical));
        }
    }

    #[test]
    fn first_mapping_wins_for_duplicate_surface_forms() {
        let table = SynonymTable::new([("ツナ", "まぐろ"), ("ツナ", "ツナ缶")]);
        assert_eq!(table.lookup("ツナ"), Some("まぐろ"));
    }

    #[test]
    fn iteration_keeps_insertion_order() {
        let table = SynonymTable::new([("b", "x"), ("a", "y")]);
        let surfaces: Vec<&str> = table.iter().map(|(s, _)| s).collect();
        assert_eq!(surfaces, vec!["x", "b", "y", "a"]);
    }
}
