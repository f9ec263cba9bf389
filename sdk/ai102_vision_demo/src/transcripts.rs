//! Fixed console texts: sample transcripts shown when a service is
//! unavailable, chapter intros, key-concept blocks and the static guides.
//!
//! Every constant ends with a newline so blocks can be written back to back.

/// Banner printed before any recognized mode.
pub const HEADER: &str = concat!(
    "================================================================================\n",
    "🎯 AI-102 Azure AI Vision Demo\n",
    "================================================================================\n",
    "\n🏢 Story: Smart Office Security System\n",
    "Demonstrating three Azure AI Vision services:\n",
    "1️⃣  Image Analysis - Scene understanding\n",
    "2️⃣  OCR - Text extraction from images\n",
    "3️⃣  Face Analysis - Face detection & attributes\n",
    "\n================================================================================\n",
);

/// Banner printed after a recognized mode finishes.
pub const COMPLETION_BANNER: &str = concat!(
    "\n================================================================================\n",
    "🎯 Demo complete! Ready for your AI-102 exam! 🚀\n",
    "================================================================================\n",
);

// ---------------------------------------------------------------------------
// Image analysis
// ---------------------------------------------------------------------------

pub const IMAGE_ANALYSIS_INTRO: &str = concat!(
    "\n📖 CHAPTER 1: IMAGE ANALYSIS\n",
    "============================================================\n",
    "🎬 Scenario: Visitor enters office lobby\n",
    "🤖 AI Task: Analyze scene and detect objects/people\n",
    "🔍 Analyzing: street.jpg\n",
);

pub const COMPUTER_VISION_UNAVAILABLE: &str =
    "❌ Computer Vision credentials not found, using educational mode\n";

pub const IMAGE_ANALYSIS_FALLBACK: &str = concat!(
    "\n🏷️  CAPTION: 'a man walking a dog on a leash'\n",
    "   Confidence: 83.1%\n",
    "\n🏷️  TOP TAGS:\n",
    "   • outdoor (99.9%)\n",
    "   • land vehicle (98.9%)\n",
    "   • vehicle (98.8%)\n",
    "   • building (98.3%)\n",
    "   • road (96.8%)\n",
    "\n📦 OBJECTS: Found 4\n",
    "   • car (79.7%)\n",
    "   • taxi (79.3%)\n",
    "   • person (79.1%)\n",
    "\n👥 PEOPLE: Detected 1\n",
    "\n💡 Educational Mode: Computer Vision API not configured\n",
    "   ⚡ Synchronous Processing: Real-time analysis\n",
);

pub const IMAGE_ANALYSIS_KEY_CONCEPTS: &str = concat!(
    "\n💡 AI-102 KEY CONCEPTS:\n",
    "   🎯 Visual Features: Choose analysis type (caption, tags, objects)\n",
    "   📊 Confidence Scores: 0.0 to 1.0 reliability measure\n",
    "   📍 Bounding Boxes: Object locations (x, y, width, height)\n",
    "   ⚡ Synchronous Processing: Real-time analysis\n",
);

// ---------------------------------------------------------------------------
// OCR
// ---------------------------------------------------------------------------

pub const OCR_INTRO: &str = concat!(
    "\n📖 CHAPTER 2: OCR (OPTICAL CHARACTER RECOGNITION)\n",
    "============================================================\n",
    "🎬 Scenario: Security badge scanner at entrance\n",
    "🤖 AI Task: Extract text from visitor's ID badge\n",
    "🔍 Analyzing: Business-card.jpg\n",
);

pub const OCR_FALLBACK: &str = concat!(
    "\n📝 EXTRACTED TEXT:\n",
    "   Line 1: 'Dr. Sarah Chen' (confidence: 99.8%)\n",
    "   Line 2: 'Senior Data Scientist' (confidence: 99.5%)\n",
    "   Line 3: 'Microsoft Corporation' (confidence: 99.9%)\n",
    "   Line 4: 'sarah.chen@microsoft.com' (confidence: 98.7%)\n",
    "\n💡 Educational Mode: Computer Vision API not configured\n",
    "   📐 Bounding Polygons: Exact text location coordinates\n",
);

pub const OCR_KEY_CONCEPTS: &str = concat!(
    "\n💡 AI-102 KEY CONCEPTS:\n",
    "   📖 Read API: Best for documents and printed text\n",
    "   🔄 Async Processing: For large documents\n",
    "   🌍 Language Detection: 73+ languages supported\n",
    "   📐 Bounding Polygons: Exact text location coordinates\n",
);

// ---------------------------------------------------------------------------
// Face analysis
// ---------------------------------------------------------------------------

pub const FACE_INTRO: &str = concat!(
    "\n📖 CHAPTER 3: FACE ANALYSIS\n",
    "============================================================\n",
    "🎬 Scenario: Facial recognition access control\n",
    "🤖 AI Task: Detect faces and analyze attributes\n",
);

pub const FACE_LIVE_NOTICE: &str = concat!(
    "🔍 Using REAL Face API\n",
    "🔍 Analyzing: people.jpg\n",
);

pub const FACE_UNAVAILABLE: &str = "🔍 Using EDUCATIONAL mode (Face API not configured)\n";

pub const FACE_FALLBACK: &str = concat!(
    "🔍 Analyzing: people.jpg\n",
    "\n👤 FACE DETECTION RESULTS (Simulated):\n",
    "   Faces detected: 2\n",
    "   \n",
    "   Face 1:\n",
    "   • Age: 32 ± 5 years\n",
    "   • Gender: Female\n",
    "   • Emotion: Happy (85.2%)\n",
    "   • Glasses: None\n",
    "   • Location: (145, 67, 120, 160)\n",
    "   \n",
    "   Face 2:\n",
    "   • Age: 28 ± 4 years\n",
    "   • Gender: Male\n",
    "   • Emotion: Neutral (76.8%)\n",
    "   • Glasses: Reading\n",
    "   • Location: (289, 73, 115, 154)\n",
    "\n💡 AI-102 KEY CONCEPTS:\n",
    "   👤 Face Detection: Locate faces in images\n",
    "   📊 Face Attributes: Age, gender, emotion, accessories\n",
    "   📍 Face Landmarks: 27-point facial feature coordinates\n",
    "   🔒 Privacy: Face detection ≠ face recognition\n",
    "   ⚖️ Compliance: Follow responsible AI guidelines\n",
);

pub const FACE_KEY_CONCEPTS: &str = concat!(
    "\n💡 AI-102 KEY CONCEPTS:\n",
    "   👤 Face Detection: Locate faces in images\n",
    "   📊 Face Attributes: Age, gender, emotion, accessories\n",
    "   📍 Face Rectangle: Bounding box coordinates\n",
    "   🔒 Privacy: Face detection ≠ face recognition\n",
    "   ⚖️ Compliance: Follow responsible AI guidelines\n",
);

// ---------------------------------------------------------------------------
// Guides
// ---------------------------------------------------------------------------

pub const EXAM_TIPS: &str = concat!(
    "\n📚 AI-102 EXAM TIPS\n",
    "============================================================\n",
    "\n🎯 IMAGE ANALYSIS:\n",
    "   • Know the difference between v3.2 and v4.0 APIs\n",
    "   • Understand confidence thresholds (default 0.5)\n",
    "   • Memorize visual feature types: Categories, Tags, Description, etc.\n",
    "   • Practice bounding box coordinate interpretation\n",
    "\n📖 OCR:\n",
    "   • Read API vs Computer Vision OCR - know when to use each\n",
    "   • Understand async operations for large documents\n",
    "   • Know language support limitations\n",
    "   • Practice polygon coordinate systems\n",
    "\n👤 FACE API:\n",
    "   • Face detection vs face recognition licensing\n",
    "   • Understand emotion detection capabilities\n",
    "   • Know privacy and compliance requirements\n",
    "   • Practice face attribute interpretation\n",
    "\n⚡ GENERAL:\n",
    "   • Understand service limits and pricing tiers\n",
    "   • Know regional availability for different versions\n",
    "   • Practice error handling and status codes\n",
    "   • Understand when to use batch vs single operations\n",
);

pub const INTEGRATION_STORY: &str = concat!(
    "\n🔗 INTEGRATION STORY\n",
    "============================================================\n",
    "\n🏢 Smart Office Security System:\n",
    "   \n",
    "   📹 Step 1: Camera captures visitor at entrance\n",
    "   🔍 Step 2: Image Analysis identifies 'person' in lobby\n",
    "   📋 Step 3: OCR reads visitor badge information\n",
    "   👤 Step 4: Face Analysis confirms human presence\n",
    "   ✅ Step 5: System grants/denies access based on analysis\n",
    "   \n",
    "   💡 All three services work together for comprehensive security!\n",
);

pub const SETUP_GUIDE: &str = concat!(
    "\n🛠️ COMPLETE AZURE SETUP GUIDE\n",
    "============================================================\n",
    "\n📋 This demo requires three Azure AI services:\n",
    "   \n",
    "   🔍 Computer Vision - Image Analysis + OCR\n",
    "   👤 Face API - Face detection and attributes\n",
    "   📍 Same resource group and region for all services\n",
    "   \n",
    "   ⚡ Quick Setup Summary:\n",
    "   1. Create resource group: 'ai102-vision-rg'\n",
    "   2. Create Computer Vision resource (East US recommended)\n",
    "   3. Create Face API resource (same region)\n",
    "   4. Copy endpoints and keys to .env file:\n",
    "      COMPUTER_VISION_ENDPOINT, COMPUTER_VISION_KEY\n",
    "      FACE_ENDPOINT, FACE_KEY\n",
    "   5. Put street.jpg, Business-card.jpg and people.jpg in ./images\n",
    "   6. Test: ai102-vision-demo all\n",
    "   \n",
    "   ✅ Demo auto-detects services and shows status!\n",
    "   💡 Follow Microsoft Learn exercises for detailed walkthrough\n",
);

/// Hint printed after an error that escaped every feature demo.
pub const DEMO_ERROR_HINT: &str =
    "💡 Check the COMPUTER_VISION_* and FACE_* entries in your .env file (see: ai102-vision-demo setup)\n";
