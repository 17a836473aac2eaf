// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::display;

pub fn print() {
    display::heading("App Integration Status:");
    display::success("AIMealSuggestionService - Implemented");
    display::success("UnifiedAINutritionService - Implemented");
    display::success("NutritionistChatView - Implemented");
    display::success("OllamaService connection - Implemented");
    display::success("Fallback knowledge base - Implemented");

    display::heading("How to Access AI Features in App:");
    println!("   1. Open Senior Nutrition App");
    println!("   2. Go to 'Nutrition' tab → tap 'AI Suggestions' button");
    println!("   3. Or go to 'Home' tab → tap 'Nutritionist Chat' button");
    println!("   4. Look for green dot = AI Ready, orange dot = Fallback mode");
}
