//! Built-in Vietnamese chit-chat intents
//!
//! Greeting, ordering food, asking price, asking the time, thanks and
//! goodbye. Patterns are written with diacritics only; matching already
//! accepts unaccented input. Thresholds are tuned for the Jaccard-based
//! scorer: a pattern sharing two of three tokens with the query clears every
//! one of them.

use viet_intent_core::IntentDefinition;

pub fn default_intents() -> Vec<IntentDefinition> {
    vec![
        IntentDefinition::new(
            "greeting",
            [
                "xin chào",
                "chào bạn",
                "chào anh",
                "chào chị",
                "chào em",
                "chào ông",
                "chào bà",
                "chào cô",
                "chào chú",
                "chào mọi người",
                "chào quý khách",
                "chào buổi sáng",
                "chào buổi chiều",
                "chào buổi tối",
                "chào",
                "hello",
                "hello there",
                "hi",
                "hi there",
                "helo",
                "good morning",
                "good afternoon",
                "good evening",
            ],
        )
        .with_keywords(["xin", "chào", "hello", "hi", "helo", "good", "xin chào"])
        .with_threshold(0.3)
        .with_response("Xin chào! Tôi có thể giúp gì cho bạn?"),
        IntentDefinition::new(
            "order_food",
            [
                "tôi muốn đặt món",
                "cho tôi đặt đồ ăn",
                "tôi muốn gọi món",
                "đặt đồ ăn giúp tôi",
                "cho tôi order món",
                "tôi muốn order đồ ăn",
                "đặt món ăn",
                "gọi món",
                "muốn ăn phở",
                "đặt bàn",
                "cho tôi một suất cơm",
                "đặt pizza",
                "order đồ uống",
                "tôi cần đặt món ăn",
                "muốn đặt",
                "đặt",
                "order",
            ],
        )
        .with_keywords(["đặt", "order", "món", "đồ ăn", "thức ăn", "gọi", "ăn", "uống"])
        .with_threshold(0.4)
        .with_response("Bạn muốn đặt món gì ạ?"),
        IntentDefinition::new(
            "ask_price",
            [
                "bao nhiêu tiền",
                "giá bao nhiêu",
                "có giá không",
                "chi phí thế nào",
                "giá cả thế nào",
                "giá như thế nào",
                "tính tiền thế nào",
                "phí bao nhiêu",
                "cost bao nhiêu",
                "giá cả ra sao",
                "bao nhiêu 1 món",
                "1 phở giá bao nhiêu",
                "cơm bao nhiêu tiền",
                "giá",
                "tiền",
                "cost",
                "bao nhiêu",
            ],
        )
        .with_keywords(["giá", "tiền", "bao nhiêu", "chi phí", "tính tiền", "phí", "cost"])
        .with_threshold(0.4)
        .with_response("Bạn muốn hỏi giá sản phẩm nào ạ?"),
        IntentDefinition::new(
            "ask_time",
            [
                "mấy giờ rồi",
                "thời gian hiện tại",
                "cho hỏi giờ",
                "bây giờ là mấy giờ",
                "hiện tại mấy giờ",
                "bây giờ mấy giờ rồi",
                "bây giờ mấy giờ",
                "giờ mấy rồi",
                "bao giờ",
                "khi nào",
                "thời gian",
                "mấy giờ",
                "giờ",
            ],
        )
        .with_keywords(["giờ", "thời gian", "mấy giờ", "bao giờ", "khi nào", "mấy"])
        .with_threshold(0.4)
        .with_response("Hiện tại là {time}"),
        IntentDefinition::new(
            "thank_you",
            [
                "cảm ơn",
                "cám ơn",
                "cảm ơn bạn",
                "cảm ơn nhiều",
                "xin cảm ơn",
                "rất cảm ơn",
                "thanks",
                "thanks you",
                "thank",
                "thank you",
                "thank you very much",
            ],
        )
        .with_keywords(["cảm ơn", "cám ơn", "thanks", "thank", "xin cảm ơn"])
        .with_threshold(0.5)
        .with_response("Không có gì! Rất vui được giúp bạn!"),
        IntentDefinition::new(
            "goodbye",
            [
                "tạm biệt",
                "chào tạm biệt",
                "hẹn gặp lại",
                "chúc một ngày tốt lành",
                "chúc ngủ ngon",
                "bye",
                "bye bye",
                "goodbye",
                "good night",
                "see you",
                "see you later",
            ],
        )
        .with_keywords(["tạm biệt", "bye", "goodbye", "good night", "see you"])
        .with_threshold(0.5)
        .with_response("Tạm biệt! Hẹn gặp lại bạn!"),
    ]
}
