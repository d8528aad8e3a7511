//! The fixed set of class names the model can output.
//!
//! Index position matches the model's output class id. The artifact was
//! exported with exactly this ordering; do not reorder or insert.

pub const BREED_LABELS: [&str; 129] = [
    "Affenpinscher",
    "Afghan_hound",
    "African_hunting_dog",
    "Airedale",
    "American_staffordshire_terrier",
    "Appenzeller",
    "Australian_shepherd",
    "Australian_terrier",
    "Basenji",
    "Basset",
    "Beagle",
    "Bedlington_terrier",
    "Bernese_mountain_dog",
    "Bichon_frise",
    "Black_and_tan_coonhound",
    "Black_sable",
    "Blenheim_spaniel",
    "Bloodhound",
    "Bluetick",
    "Border_collie",
    "Border_terrier",
    "Borzoi",
    "Boston_bull",
    "Bouvier_des_flandres",
    "Boxer",
    "Brabancon_griffo",
    "Briard",
    "Brittany_spaniel",
    "Bull_mastiff",
    "Cairn",
    "Cane_carso",
    "Cardigan",
    "Chesapeake_bay_retriever",
    "Chihuahua",
    "Chinese_crested_dog",
    "Chinese_rural_dog",
    "Chow",
    "Clumber",
    "Cocker_spaniel",
    "Collie",
    "Curly_coated_retriever",
    "Dandie_dinmont",
    "Dhole",
    "Dingo",
    "Doberman",
    "English_foxhound",
    "English_setter",
    "English_springer",
    "Entlebucher",
    "Eskimo_dog",
    "Fila braziliero",
    "Flat_coated_retriever",
    "French_bulldog",
    "German_shepherd",
    "German_short_haired_pointer",
    "Giant_schnauzer",
    "Golden_retriever",
    "Gordon_setter",
    "Great_dane",
    "Great_pyrenees",
    "Greater_swiss_mountain_dog",
    "Groenendael",
    "Ibizan_hound",
    "Irish_setter",
    "Irish_terrier",
    "Irish_water_spaniel",
    "Irish_wolfhound",
    "Italian_greyhound",
    "Japanese_spaniel",
    "Japanese_spitzes",
    "Keeshond",
    "Kelpie",
    "Kerry_blue_terrier",
    "Komondor",
    "Kuvasz",
    "Labrador_retriever",
    "Lakeland_terrier",
    "Leonberg",
    "Lhasa",
    "Malamute",
    "Malinois",
    "Maltese_dog",
    "Mexican_hairless",
    "Miniature_pinscher",
    "Miniature_poodle",
    "Miniature_schnauzer",
    "Newfoundland",
    "Norfolk_terrier",
    "Norwegian_elkhound",
    "Norwich_terrier",
    "Old_english_sheepdog",
    "Otterhound",
    "Papillon",
    "Pekinese",
    "Pembroke",
    "Pomeranian",
    "Pug",
    "Redbone",
    "Rhodesian_ridgeback",
    "Rottweiler",
    "Saint_bernard",
    "Saluki",
    "Samoyed",
    "Schipperke",
    "Scotch_terrier",
    "Scottish_deerhound",
    "Sealyham_terrier",
    "Shetland_sheepdog",
    "Shiba_dog",
    "Shih_tzu",
    "Siberian_husky",
    "Silky_terrier",
    "Soft_coated_wheaten_terrier",
    "Staffordshire_bullterrier",
    "Standard_poodle",
    "Standard_schnauzer",
    "Sussex_spaniel",
    "Tibetan_mastiff",
    "Tibetan_terrier",
    "Toy_poodle",
    "Toy_terrier",
    "Vizsla",
    "Walker_hound",
    "Weimaraner",
    "Welsh_springer_spaniel",
    "West_highland_white_terrier",
    "Whippet",
    "Wire_haired_fox_terrier",
    "Yorkshire_terrier",
];
