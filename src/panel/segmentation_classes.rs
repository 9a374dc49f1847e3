//! ADE20K class names and their conventional segmentation colours.
use image::Rgb;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentationClass {
    pub name: &'static str,
    pub color: Rgb<u8>,
}

const fn class(name: &'static str, r: u8, g: u8, b: u8) -> SegmentationClass {
    SegmentationClass { name, color: Rgb([r, g, b]) }
}

pub const CLASSES: &[SegmentationClass] = &[
    class("wall", 120, 120, 120),
    class("building, edifice", 180, 120, 120),
    class("sky", 6, 230, 230),
    class("floor, flooring", 80, 50, 50),
    class("tree", 4, 200, 3),
    class("ceiling", 120, 120, 80),
    class("road, route", 140, 140, 140),
    class("bed", 204, 5, 255),
    class("windowpane, window", 230, 230, 230),
    class("grass", 4, 250, 7),
    class("cabinet", 224, 5, 255),
    class("sidewalk, pavement", 235, 255, 7),
    class("person, individual, someone, somebody, mortal, soul", 150, 5, 61),
    class("earth, ground", 120, 120, 70),
    class("door, double door", 8, 255, 51),
    class("table", 255, 6, 82),
    class("mountain, mount", 143, 255, 140),
    class("plant, flora, plant life", 204, 255, 4),
    class("curtain, drape, drapery, mantle, pall", 255, 51, 7),
    class("chair", 204, 70, 3),
    class("car, auto, automobile, machine, motorcar", 0, 102, 200),
    class("water", 61, 230, 250),
    class("painting, picture", 255, 6, 51),
    class("sofa, couch, lounge", 11, 102, 255),
    class("shelf", 255, 7, 71),
    class("house", 255, 9, 224),
    class("sea", 9, 7, 230),
    class("mirror", 220, 220, 220),
    class("rug, carpet, carpeting", 255, 9, 92),
    class("field", 112, 9, 255),
    class("armchair", 8, 255, 214),
    class("seat", 7, 255, 224),
    class("fence, fencing", 255, 184, 6),
    class("desk", 10, 255, 71),
    class("rock, stone", 255, 41, 10),
    class("wardrobe, closet, press", 7, 255, 255),
    class("lamp", 224, 255, 8),
    class("bathtub, bathing tub, bath, tub", 102, 8, 255),
    class("railing, rail", 255, 61, 6),
    class("cushion", 255, 194, 7),
    class("base, pedestal, stand", 255, 122, 8),
    class("box", 0, 255, 20),
    class("column, pillar", 255, 8, 41),
    class("signboard, sign", 255, 5, 153),
    class("chest of drawers, chest, bureau, dresser", 6, 51, 255),
    class("counter", 235, 12, 255),
    class("sand", 160, 150, 20),
    class("sink", 0, 163, 255),
    class("skyscraper", 140, 140, 140),
    class("fireplace, hearth, open fireplace", 250, 10, 15),
    class("refrigerator, icebox", 20, 255, 0),
    class("grandstand, covered stand", 31, 255, 0),
    class("path", 255, 31, 0),
    class("stairs, steps", 255, 224, 0),
    class("runway", 153, 255, 0),
    class("case, display case, showcase, vitrine", 0, 0, 255),
    class("pool table, billiard table, snooker table", 255, 71, 0),
    class("pillow", 0, 235, 255),
    class("screen door, screen", 0, 173, 255),
    class("stairway, staircase", 31, 0, 255),
    class("river", 11, 200, 200),
    class("bridge, span", 255, 82, 0),
    class("bookcase", 0, 255, 245),
    class("blind, screen", 0, 61, 255),
    class("coffee table, cocktail table", 0, 255, 112),
    class("toilet, can, commode, crapper, pot, potty, stool, throne", 0, 255, 133),
    class("flower", 255, 0, 0),
    class("book", 255, 163, 0),
    class("hill", 255, 102, 0),
    class("bench", 194, 255, 0),
    class("countertop", 0, 143, 255),
    class("stove, kitchen stove, range, kitchen range, cooking stove", 51, 255, 0),
    class("palm, palm tree", 0, 82, 255),
    class("kitchen island", 0, 255, 41),
    class("computer, computing machine, computing device, data processor", 0, 255, 173),
    class("swivel chair", 10, 0, 255),
    class("boat", 173, 255, 0),
    class("bar", 0, 255, 153),
    class("arcade machine", 255, 92, 0),
    class("hovel, hut, hutch, shack, shanty", 255, 0, 255),
    class("bus, autobus, coach, charabanc, double-decker, jitney, motorbus", 255, 0, 245),
    class("towel", 255, 0, 102),
    class("light, light source", 255, 173, 0),
    class("truck, motortruck", 255, 0, 20),
    class("tower", 255, 184, 184),
    class("chandelier, pendant, pendent", 0, 31, 255),
    class("awning, sunshade, sunblind", 0, 255, 61),
    class("streetlight, street lamp", 0, 71, 255),
    class("booth, cubicle, stall, kiosk", 255, 0, 204),
    class("television receiver, television, tv, tv set", 0, 255, 194),
    class("airplane, aeroplane, plane", 0, 255, 82),
    class("dirt track", 0, 10, 255),
    class("apparel, wearing apparel, dress, clothes", 0, 112, 255),
    class("pole", 51, 0, 255),
    class("land, ground, soil", 0, 194, 255),
    class("bannister, banister, balustrade, balusters, handrail", 0, 122, 255),
    class("escalator, moving staircase, moving stairway", 0, 255, 163),
    class("ottoman, pouf, pouffe, puff, hassock", 255, 153, 0),
    class("bottle", 0, 255, 10),
    class("buffet, counter, sideboard", 255, 112, 0),
    class("poster, posting, placard, notice, bill, card", 143, 255, 0),
    class("stage", 82, 0, 255),
    class("van", 163, 255, 0),
    class("ship", 255, 235, 0),
    class("fountain", 8, 184, 170),
    class("conveyer belt, conveyor belt, conveyer, conveyor, transporter", 133, 0, 255),
    class("canopy", 0, 255, 92),
    class("washer, automatic washer, washing machine", 184, 0, 255),
    class("plaything, toy", 255, 0, 31),
    class("swimming pool, swimming bath, natatorium", 0, 184, 255),
    class("stool", 0, 214, 255),
    class("barrel, cask", 255, 0, 112),
    class("basket, handbasket", 92, 255, 0),
    class("waterfall, falls", 0, 224, 255),
    class("tent, collapsible shelter", 112, 224, 255),
    class("bag", 70, 184, 160),
    class("minibike, motorbike", 163, 0, 255),
    class("cradle", 153, 0, 255),
    class("oven", 71, 255, 0),
    class("ball", 255, 0, 163),
    class("food, solid food", 255, 204, 0),
    class("step, stair", 255, 0, 143),
    class("tank, storage tank", 0, 255, 235),
    class("trade name, brand name, brand, marque", 133, 255, 0),
    class("microwave, microwave oven", 255, 0, 235),
    class("pot, flowerpot", 245, 0, 255),
    class("animal, animate being, beast, brute, creature, fauna", 255, 0, 122),
    class("bicycle, bike, wheel, cycle", 255, 245, 0),
    class("lake", 10, 190, 212),
    class("dishwasher, dish washer, dishwashing machine", 214, 255, 0),
    class("screen, silver screen, projection screen", 0, 204, 255),
    class("blanket, cover", 20, 0, 255),
    class("sculpture", 255, 255, 0),
    class("hood, exhaust hood", 0, 153, 255),
    class("sconce", 0, 41, 255),
    class("vase", 0, 255, 204),
    class("traffic light, traffic signal, stoplight", 41, 0, 255),
    class("tray", 41, 255, 0),
    class("ashcan, trash can, garbage can, wastebin, ash bin, dustbin", 173, 0, 255),
    class("fan", 0, 245, 255),
    class("pier, wharf, wharfage, dock", 71, 0, 255),
    class("crt screen", 122, 0, 255),
    class("plate", 0, 255, 184),
    class("monitor, monitoring device", 0, 92, 255),
    class("bulletin board, notice board", 184, 255, 0),
    class("shower", 0, 133, 255),
    class("radiator", 255, 214, 0),
    class("glass, drinking glass", 25, 194, 194),
    class("clock", 102, 255, 0),
    class("flag", 92, 0, 255),
];
