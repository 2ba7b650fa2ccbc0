//! Prompt text and the quiz response schema

use serde_json::{Value, json};

/// Request for a structured lesson on one topic
pub fn lesson_prompt(title: &str, description: &str) -> String {
    format!(
        "أنت أستاذ متخصص في أصول الفقه الإسلامي.
المطلوب: شرح درس بعنوان \"{title}\".
الوصف: {description}

يرجى تقديم الشرح باللغة العربية الفصحى الأكاديمية والميسرة.

الهيكلية المطلوبة للشرح:
1. **مقدمة**: تعريف مبسط للمفهوم.
2. **المحاور الرئيسية**: شرح النقاط الأساسية بالتفصيل مع أمثلة فقهية إن أمكن.
3. **الخلاصة**: تلخيص لأهم النقاط.

استخدم تنسيق Markdown بشكل جيد (عناوين، نقاط، خط عريض)."
    )
}

/// Request for `count` multiple-choice questions
pub fn quiz_prompt(title: &str, count: usize) -> String {
    format!(
        "أنشئ اختباراً قصيراً (Quiz) مكوناً من {count} أسئلة حول موضوع: \"{title}\" في علم أصول الفقه.
الأسئلة يجب أن تكون دقيقة علمياً ومتنوعة الصعوبة.
لكل سؤال أربعة خيارات بالضبط، وخيار صحيح واحد."
    )
}

/// Tutor persona bound to the current lesson
pub fn tutor_instruction(topic_title: &str) -> String {
    format!(
        "أنت \"الأصولي\"، معلم ذكي متخصص في أصول الفقه.
المستخدم يدرس حالياً موضوع: \"{topic_title}\".

دورك:
1. الإجابة على أسئلة الطالب بدقة علمية.
2. الاستدلال بالآيات والأحاديث والقواعد الأصولية.
3. التلطف في الأسلوب وتشجيع الطالب.
4. إذا سأل الطالب عن موضوع خارج أصول الفقه، وجهه بلطف للعودة للموضوع، إلا إذا كان له صلة وثيقة."
    )
}

/// Response schema for quiz generation
pub fn quiz_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "question": { "type": "STRING", "description": "نص السؤال" },
                "options": {
                    "type": "ARRAY",
                    "items": { "type": "STRING" },
                    "description": "4 خيارات للإجابة"
                },
                "correctAnswerIndex": {
                    "type": "INTEGER",
                    "description": "رقم الخيار الصحيح (0-3)"
                },
                "explanation": {
                    "type": "STRING",
                    "description": "شرح لماذا هذه الإجابة هي الصحيحة"
                }
            },
            "required": ["question", "options", "correctAnswerIndex", "explanation"]
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lesson_prompt_names_topic_and_description() {
        let prompt = lesson_prompt("القياس", "أركانه وشروطه.");
        assert!(prompt.contains("\"القياس\""));
        assert!(prompt.contains("أركانه وشروطه."));
    }

    #[test]
    fn quiz_prompt_asks_for_count() {
        assert!(quiz_prompt("الإجماع", 5).contains("مكوناً من 5 أسئلة"));
    }

    #[test]
    fn tutor_instruction_is_topic_bound() {
        assert!(tutor_instruction("التقليد").contains("موضوع: \"التقليد\""));
    }

    #[test]
    fn schema_requires_every_field() {
        let schema = quiz_schema();
        let required = schema["items"]["required"].as_array().unwrap();
        assert_eq!(required.len(), 4);
        assert!(required.iter().any(|f| f == "correctAnswerIndex"));
    }
}
