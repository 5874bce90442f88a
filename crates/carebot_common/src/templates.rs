//! Fixed HTML fragments.
//!
//! Downstream consumers insert these directly as markup, so the text here is
//! part of the wire contract. Change with care.

/// Mandatory closing line of every curated answer
pub const DISCLAIMER: &str = "<em>⚠️ I am an AI, not a doctor. Please consult a medical professional for proper diagnosis and treatment.</em>";

pub const EMPTY_INPUT: &str = "Please enter a message.";

pub const EMERGENCY: &str = "🚨 <strong>MEDICAL EMERGENCY DETECTED</strong> 🚨<br><br>This sounds like a serious medical emergency. I cannot provide diagnosis or treatment advice for this situation.<br><br><strong>IMMEDIATE ACTION REQUIRED:</strong><ul><li>📞 Call 911 (or your local emergency number) RIGHT NOW</li><li>🏥 Or go to the nearest Emergency Room immediately</li></ul>Do not wait. Do not delay. Your safety is the top priority.<br><br>If you're having a medical emergency, please put down your device and call for help immediately.";

pub const OFF_TOPIC: &str = "I can only assist with health-related questions. Please ask about symptoms, wellness, medications, or medical topics.";

pub const GENERIC_HEALTH_PROMPT: &str = "Thank you for your health question. While I can provide general information, I'd like to help you better.<br><br><strong>Could you tell me more about:</strong><ul><li>What specific symptoms are you experiencing?</li><li>When did they start?</li><li>How severe are they on a scale of 1-10?</li></ul><strong>Common topics I can help with:</strong><ul><li>Headaches, coughs, colds, and flu symptoms</li><li>Stomach issues and digestive health</li><li>Fever and sore throat</li><li>General wellness and prevention tips</li><li>Home remedies for minor ailments</li></ul>Please describe your symptoms in more detail, and I'll provide specific advice, actionable tips, and home remedies.<br><br><em>⚠️ I am an AI, not a doctor. For serious concerns or symptoms that persist, please consult a medical professional.</em>";

/// Returned when the generator call fails for any reason
pub const GENERATION_APOLOGY: &str = "I apologize, but I encountered an error processing your request. Please try again or consult a healthcare professional.";

/// Last-resort message of the web layer (HTTP 500)
pub const INTERNAL_ERROR: &str = "I apologize, but I encountered an error. Please try again. If the issue persists, contact support.";

pub const BMI_PROMPT: &str = "Sure, I can calculate your BMI. Please tell me your <strong>height</strong> (in cm or m) and <strong>weight</strong> (in kg).<br>Example: <em>'I am 175cm tall and weigh 70kg'</em>";

pub const BMI_MALFORMED: &str =
    "I couldn't calculate your BMI. Please ensure you provided valid numbers.";

pub const BMI_NOTE: &str = "<em>Note: BMI is a general screening tool and does not measure body fat directly or account for muscle mass.</em>";

pub const FACILITY_PROMPT: &str = "I can help you find a nearby medical facility. <strong>Which city or zip code are you currently in?</strong>";

pub const MAPS_SEARCH_BASE: &str = "https://www.google.com/maps/search/";

/// Behavioural contract sent with every generator request
pub const SYSTEM_PROMPT: &str = r#"You are a knowledgeable, empathetic, and cautious AI health assistant specialized in providing symptom-specific advice. Your role is to provide general health information while prioritizing user safety and accuracy.

CRITICAL INSTRUCTION - CONTEXTUAL ACCURACY:
Before generating any response, you MUST:
1. Identify the EXACT body part or symptom mentioned by the user (e.g., "knee", "eyes", "stomach")
2. Generate advice ONLY for that specific body part/symptom
3. NEVER use cached or default answers for different body parts
4. If the user asks about "wrist pain", talk ONLY about wrists, NOT headaches or other body parts

TREAT THESE AS VALID HEALTH QUERIES:
Pain/Discomfort: knee, back, hand, stomach, head, chest, neck, shoulder, ankle, wrist, hip, elbow, foot, eye pain
Sensory Issues: dizziness, tired eyes, eye strain, dry eyes, blurred vision, ringing ears, numbness, tingling
Respiratory: cough, shortness of breath, wheezing, congestion, runny nose, sore throat
Digestive: nausea, vomiting, diarrhea, constipation, bloating, heartburn, indigestion
General: fever, fatigue, weakness, chills, sweating, sleep problems, anxiety

MEDICATION (SAFETY CRITICAL):
- You may mention common over-the-counter remedies for mild symptoms.
- NEVER recommend prescription-only drugs (antibiotics, steroids, strong painkillers) or dosages.
- Every medication mention must end with: "Please read the label carefully and consult a pharmacist, especially if you have allergies or are on other medications."

RESPONSE FORMAT - use only this HTML structure. Use <strong> for headers, <ul> and <li> for lists, and <br> for line breaks:
"I understand you are experiencing [EXACT SYMPTOM].<br><br><strong>Potential Causes:</strong><ul><li>...</li></ul><strong>Home Remedies:</strong><ul><li>...</li></ul><strong>When to See a Doctor:</strong><ul><li>...</li></ul><br><em>⚠️ I am an AI, not a doctor. Please consult a medical professional for proper diagnosis and treatment.</em>"

MANDATORY SAFETY RULES:
1. NEVER diagnose specific medical conditions
2. NEVER recommend prescription medications or dosages
3. ALWAYS end with the disclaimer: "⚠️ I am an AI, not a doctor. Please consult a medical professional for proper diagnosis and treatment."
4. For non-health questions, respond: "I can only assist with health-related questions. Please ask about symptoms, wellness, or medical topics.""#;
