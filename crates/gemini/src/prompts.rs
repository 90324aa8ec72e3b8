//! Prompt templates and structured-output schemas.
//!
//! Analysis and suggestion prompts are Arabic and ask for Arabic values;
//! the image prompts are English.

use khizana_core::profile::UserProfile;
use serde_json::{json, Value};

pub const ANALYZE_PROMPT: &str = "حلل قطعة الملابس في هذه الصورة. استجب بتنسيق JSON. \
يجب أن يحتوي كائن JSON على هذه المفاتيح: 'type' (مثل 'قميص'، 'جينز')، 'color' (اللون السائد)، \
'style' (مثل 'كاجوال'، 'رسمي')، 'season' (مثل 'صيف'، 'شتاء')، و 'description' \
(وصف موجز للقطعة بما في ذلك أي نقوش أو تفاصيل). يجب أن تكون جميع القيم باللغة العربية.";

pub const PROFESSIONALIZE_PROMPT: &str = "Take the clothing item from this image. \
If it is wrinkled or creased, digitally smooth it out to make it look perfectly ironed. \
Then, remove the background completely and place it on a clean, light grey, professional \
studio background. The item should be centered and well-lit, suitable for an e-commerce website.";

/// Schema for [`ANALYZE_PROMPT`]: all five attributes required.
pub fn analysis_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "type": { "type": "STRING", "description": "نوع قطعة الملابس" },
            "color": { "type": "STRING", "description": "اللون الأساسي للملابس" },
            "style": { "type": "STRING", "description": "نمط الملابس" },
            "season": { "type": "STRING", "description": "الموسم المناسب للملابس" },
            "description": { "type": "STRING", "description": "وصف مفصل للملابس" }
        },
        "required": ["type", "color", "style", "season", "description"]
    })
}

/// Schema for [`suggestion_prompt`]: an array of named outfits.
pub fn suggestion_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "outfitName": { "type": "STRING" },
                "items": { "type": "ARRAY", "items": { "type": "STRING" } }
            },
            "required": ["outfitName", "items"]
        }
    })
}

/// Ask for three outfits for `occasion` drawn only from `descriptors`.
pub fn suggestion_prompt(descriptors: &[String], occasion: &str) -> String {
    let wardrobe = serde_json::to_string(descriptors).unwrap_or_else(|_| "[]".into());
    format!(
        "أنت خبير في تنسيق الأزياء. يحتاج المستخدم إلى طقم للمناسبة التالية: \"{occasion}\". \
لديه الملابس التالية في خزانته: {wardrobe}.\n\
اقترح 3 أطقم متميزة باستخدام الملابس من هذه القائمة فقط. لكل طقم، قدم اسمًا إبداعيًا وقائمة بالملابس المستخدمة بالضبط.\n\
يجب أن تكون الاستجابة على شكل مصفوفة JSON، حيث يمثل كل كائن طقمًا ويحتوي على 'outfitName' (سلسلة نصية) \
و 'items' (مصفوفة من السلاسل النصية، حيث تكون كل سلسلة نصية وصفًا لقطعة ملابس من القائمة المقدمة)."
    )
}

/// Ask for the person in the first image wearing the `garment_count`
/// garments that follow it.
pub fn compose_prompt(profile: &UserProfile, garment_count: usize) -> String {
    format!(
        "The first image is a full-body photo of a person who is {height} cm tall and weighs \
{weight} kg. The next {garment_count} images are clothing items. Generate a single realistic, \
full-body photo of this same person wearing all of these clothing items together as one outfit. \
Keep the person's face, body proportions and skin tone unchanged, keep every garment's color, \
pattern and cut faithful to its image, and use a clean, light grey studio background.",
        height = profile.height.trim(),
        weight = profile.weight.trim(),
    )
}
