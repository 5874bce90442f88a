//! Built-in curated entries.

pub(super) struct BuiltinEntry {
    pub key: &'static str,
    pub answer: &'static str,
    pub tips: &'static [&'static str],
    pub remedies: &'static [&'static str],
}

pub(super) const ENTRIES: &[BuiltinEntry] = &[
    BuiltinEntry {
        key: "headache",
        answer: "Headaches can be caused by stress, dehydration, poor sleep, or tension. They are very common and usually not serious.",
        tips: &[
            "Rest in a quiet, dark room",
            "Stay well-hydrated (8-10 glasses of water daily)",
            "Practice relaxation techniques like deep breathing",
            "Maintain regular sleep schedule",
            "Avoid excessive screen time",
        ],
        remedies: &[
            "Apply a cold compress to your forehead",
            "Gently massage your temples in circular motions",
            "Try peppermint or lavender essential oil aromatherapy",
            "Drink ginger tea to reduce inflammation",
        ],
    },
    BuiltinEntry {
        key: "cough",
        answer: "A cough is your body's way of clearing irritants from your airways. It can be caused by colds, allergies, or respiratory infections.",
        tips: &[
            "Stay hydrated to thin mucus",
            "Use a humidifier to keep air moist",
            "Avoid smoke and strong odors",
            "Get plenty of rest",
            "Elevate your head while sleeping",
        ],
        remedies: &[
            "Honey and warm water: Mix 1-2 tablespoons in warm water",
            "Steam inhalation: Breathe in warm, moist air",
            "Saltwater gargle: Mix 1/2 teaspoon salt in warm water",
            "Ginger tea: Steep fresh ginger for 10 minutes",
        ],
    },
    BuiltinEntry {
        key: "stomach",
        answer: "Stomach discomfort can result from indigestion, gas, stress, or dietary choices. It's usually temporary and manageable.",
        tips: &[
            "Eat smaller, more frequent meals",
            "Avoid spicy, fatty, or acidic foods",
            "Stay upright after eating",
            "Manage stress through relaxation",
            "Keep a food diary to identify triggers",
        ],
        remedies: &[
            "Peppermint tea: Soothes digestive system",
            "Ginger: Chew small pieces or make tea",
            "Warm compress on stomach for comfort",
            "Chamomile tea: Reduces inflammation",
        ],
    },
    BuiltinEntry {
        key: "dizzy",
        answer: "Dizziness can be caused by dehydration, low blood sugar, sudden movements, or inner ear issues. It's important to sit down when feeling dizzy.",
        tips: &[
            "Sit or lie down immediately if dizzy",
            "Stay well-hydrated throughout the day",
            "Avoid sudden movements or standing quickly",
            "Eat regular, balanced meals",
            "Limit caffeine and alcohol",
        ],
        remedies: &[
            "Deep breathing exercises: Breathe slowly and deeply",
            "Ginger tea: Helps with balance",
            "Stay seated until dizziness passes",
            "Drink water with a pinch of salt and sugar",
        ],
    },
    BuiltinEntry {
        key: "fever",
        answer: "Fever is your body's natural response to fighting infection. A mild fever (under 102°F/39°C) is usually not dangerous.",
        tips: &[
            "Rest and stay in bed",
            "Drink plenty of fluids",
            "Wear light clothing",
            "Keep room temperature comfortable",
            "Monitor temperature regularly",
        ],
        remedies: &[
            "Cool compress: Apply to forehead and wrists",
            "Lukewarm bath: Not cold, to avoid shivering",
            "Herbal tea: Chamomile or elderflower",
            "Stay hydrated with water and clear broths",
        ],
    },
    BuiltinEntry {
        key: "cold",
        answer: "The common cold is a viral infection affecting your nose and throat. It usually resolves on its own within 7-10 days.",
        tips: &[
            "Get plenty of rest and sleep",
            "Drink warm fluids",
            "Use saline nasal drops",
            "Wash hands frequently",
            "Avoid close contact with others",
        ],
        remedies: &[
            "Chicken soup: Warm, nutritious, and soothing",
            "Honey and lemon in warm water",
            "Steam inhalation with eucalyptus",
            "Gargle with warm salt water",
        ],
    },
    BuiltinEntry {
        key: "sore throat",
        answer: "A sore throat is often caused by viral infections, allergies, or dry air. It typically improves within a few days.",
        tips: &[
            "Stay hydrated with warm beverages",
            "Avoid shouting or straining voice",
            "Use a humidifier at night",
            "Rest your voice when possible",
            "Avoid irritants like smoke",
        ],
        remedies: &[
            "Warm salt water gargle: 3-4 times daily",
            "Honey and lemon tea: Soothes throat",
            "Warm herbal teas: Chamomile or licorice root",
            "Ice chips or popsicles: Numb the pain",
        ],
    },
    BuiltinEntry {
        key: "knee",
        answer: "Knee pain can result from overuse, minor injuries, strain, or inflammation. It's one of the most common joint complaints.",
        tips: &[
            "Rest and avoid activities that worsen the pain",
            "Wear supportive, cushioned footwear",
            "Maintain a healthy weight to reduce joint stress",
            "Perform low-impact exercises like swimming",
            "Strengthen quadriceps and hamstring muscles",
        ],
        remedies: &[
            "R.I.C.E Method: Rest, Ice (20 mins every 2-3 hours), Compression (elastic bandage), Elevation",
            "Gentle stretching: Hamstring and quad stretches",
            "Turmeric tea: Natural anti-inflammatory",
            "Warm compress after first 48 hours for chronic pain",
        ],
    },
    BuiltinEntry {
        key: "tired eyes",
        answer: "Eye strain (asthenopia) is common with prolonged screen time, reading, or poor lighting. Your eyes need regular breaks to recover.",
        tips: &[
            "Follow the 20-20-20 rule during screen time",
            "Ensure proper lighting when reading or working",
            "Get 7-8 hours of quality sleep nightly",
            "Adjust screen brightness to match surroundings",
            "Keep screen at arm's length, slightly below eye level",
        ],
        remedies: &[
            "20-20-20 Rule: Every 20 minutes, look 20 feet away for 20 seconds",
            "Warm compress: Place over closed eyes for 5-10 minutes",
            "Blink exercises: Consciously blink 10 times slowly",
            "Chamomile tea bags: Cool and place on closed eyes",
        ],
    },
    BuiltinEntry {
        key: "dry eyes",
        answer: "Dry eyes occur when your tears aren't able to provide adequate lubrication for your eyes. This is common in air-conditioned environments or after long screen use.",
        tips: &[
            "Blink more frequently when using screens",
            "Follow the 20-20-20 rule",
            "Use a humidifier to add moisture to the air",
            "Position your computer screen below eye level",
            "Stay hydrated by drinking plenty of water",
        ],
        remedies: &[
            "Artificial tears (preservative-free eye drops)",
            "Warm compress to unclog oil glands",
            "Omega-3 fatty acid supplements (consult doctor)",
            "Eyelid massage with warm washcloth",
        ],
    },
    BuiltinEntry {
        key: "eye pain",
        answer: "Mild eye pain can be due to strain or dryness. However, severe or sharp pain requires medical attention.",
        tips: &[
            "Rest your eyes immediately",
            "Avoid bright lights and screens",
            "Do not rub your eyes",
            "Check if a foreign object is in the eye (wash with water)",
            "Wear sunglasses outdoors",
        ],
        remedies: &[
            "Cold compress for inflammation or minor injury",
            "Warm compress for styes or strain",
            "Over-the-counter lubricating eye drops",
            "Rest in a dark room",
        ],
    },
    BuiltinEntry {
        key: "back",
        answer: "Back pain is very common and usually caused by muscle strain, poor posture, or sudden movements. Most cases improve with self-care.",
        tips: &[
            "Maintain good posture when sitting and standing",
            "Use ergonomic chairs with lumbar support",
            "Lift objects properly using your legs, not your back",
            "Stay active with low-impact exercises",
            "Strengthen core muscles to support your spine",
        ],
        remedies: &[
            "Alternate heat and cold: Ice first 48 hours, then heat therapy",
            "Gentle stretching: Cat-cow pose, child's pose from yoga",
            "Epsom salt bath: Soak for 20 minutes to relax muscles",
            "Proper sleep position: Use pillow between knees if side-sleeping",
        ],
    },
];
