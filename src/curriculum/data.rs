//! Built-in curriculum content

use once_cell::sync::Lazy;

use super::model::{Category, Curriculum, Topic};

static CURRICULUM: Lazy<Curriculum> = Lazy::new(build);

/// The curriculum shipped with the application
pub fn builtin() -> &'static Curriculum {
    &CURRICULUM
}

fn category(
    id: &str,
    title: &str,
    description: &str,
    category: Category,
    lessons: &[(&str, &str, &str)],
) -> Topic {
    let children = lessons
        .iter()
        .map(|(id, title, description)| Topic::leaf(*id, *title, *description, category))
        .collect();
    Topic::leaf(id, title, description, category).with_children(children)
}

fn build() -> Curriculum {
    Curriculum::new(vec![
        category(
            "intro",
            "مقدمة في أصول الفقه",
            "التعريف بالعلم، نشأته، وتطوره عبر العصور.",
            Category::Intro,
            &[
                ("def", "تعريف أصول الفقه", "التعريف اللغوي والاصطلاحي."),
                ("history", "نشأة العلم وتدوينه", "لمحة تاريخية عن بداية التدوين وأهم الكتب."),
                ("importance", "أهمية وفائدة العلم", "لماذا ندرس أصول الفقه؟"),
            ],
        ),
        category(
            "sources",
            "الأدلة الشرعية",
            "المصادر التي يُستنبط منها الحكم الشرعي.",
            Category::Sources,
            &[
                ("quran", "القرآن الكريم", "حجيته ودلالته."),
                ("sunnah", "السنة النبوية", "أقسامها وحجيتها."),
                ("ijma", "الإجماع", "تعريفه، أنواعه، وحجيته."),
                ("qiyas", "القياس", "أركانه وشروطه."),
                ("secondary", "الأدلة التبعية", "الاستحسان، المصالح المرسلة، سد الذرائع."),
            ],
        ),
        category(
            "rules",
            "دلالات الألفاظ",
            "قواعد تفسير النصوص.",
            Category::Rules,
            &[
                ("am_khas", "العام والخاص", "الفرق بينهما وأحكامهما."),
                ("mutlaq_muqayyad", "المطلق والمقيد", "حمل المطلق على المقيد."),
                ("amr_nahy", "الأمر والنهي", "صيغهما ودلالتهما."),
                ("mantuq_mafhum", "المنطوق والمفهوم", "دلالة اللفظ في محل النطق وفي غيره."),
            ],
        ),
        category(
            "ijtihad",
            "الاجتهاد والتقليد",
            "أحكام المجتهد والمقلد.",
            Category::Ijtihad,
            &[
                ("ijtihad_def", "حقيقة الاجتهاد", "شروط المجتهد ومجالات الاجتهاد."),
                ("taqlid", "التقليد", "حكمه ومتى يجب."),
                ("taarud", "التعارض والترجيح", "ماذا نفعل عند تعارض الأدلة."),
            ],
        ),
    ])
}
